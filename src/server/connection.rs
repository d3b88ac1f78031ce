// Connection handling module
// Accepts a single TCP connection and serves it over HTTP/1.1

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppState, PerformanceConfig};
use crate::handler;

/// Accept and process a connection, checking limits and logging.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<AppState>,
) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = state.active_connections.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            // Exceeded limit: rollback counter and reject
            state.active_connections.fetch_sub(1, Ordering::SeqCst);
            state.logger.warn(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected."
            ));
            drop(stream);
            return;
        }
    }

    state.logger.log_connection_accepted(&peer_addr);

    handle_connection(stream, Arc::clone(state));
}

/// Handle a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Configures HTTP/1.1 connection settings (keep-alive)
/// 3. Serves the connection with the request handler
/// 4. Bounds the connection by `connection_lifetime`
/// 5. Decrements connection counter when done
fn handle_connection(stream: tokio::net::TcpStream, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let performance = &state.config.performance;
        let keep_alive = performance.keep_alive_timeout > 0;
        let lifetime = connection_lifetime(performance);

        let mut builder = http1::Builder::new();
        builder.keep_alive(keep_alive);

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&service_state);
                async move { Ok::<_, Infallible>(handler::handle_request(&req, &state)) }
            }),
        );

        match tokio::time::timeout(lifetime, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => state.logger.log_connection_error(&err),
            // Expected end of a keep-alive session
            Err(_) if keep_alive => state.logger.debug(&format!(
                "Keep-alive connection closed after {} seconds",
                lifetime.as_secs()
            )),
            Err(_) => state.logger.warn(&format!(
                "Connection timeout after {} seconds",
                lifetime.as_secs()
            )),
        }

        state.active_connections.fetch_sub(1, Ordering::SeqCst);
    });
}

/// Upper bound on how long one connection is served.
///
/// Keep-alive connections live for `keep_alive_timeout` seconds; with
/// keep-alive off (`0`) a connection gets `max(read_timeout, write_timeout)`
/// to deliver its single request and response.
fn connection_lifetime(performance: &PerformanceConfig) -> Duration {
    let secs = if performance.keep_alive_timeout > 0 {
        performance.keep_alive_timeout
    } else {
        std::cmp::max(performance.read_timeout, performance.write_timeout)
    };
    Duration::from_secs(secs)
}
