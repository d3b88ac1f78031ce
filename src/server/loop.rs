// Server loop module
// Accepts connections until shutdown is requested

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;

/// Accept connections until `shutdown` is notified.
///
/// In-flight connections keep running in their own tasks; only the
/// listener is closed on return.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> std::io::Result<()> {
    let local_addr = listener.local_addr()?;
    state.logger.log_server_start(&local_addr, &state.config);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => state.logger.error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = shutdown.notified() => {
                state.logger.log_shutdown();
                break;
            }
        }
    }

    drop(listener);
    Ok(())
}
