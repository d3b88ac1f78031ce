use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

mod arithmetic;
mod config;
mod handler;
mod http;
mod logger;
mod server;

/// How long in-flight connections may run after the listener closes
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config file path (without extension) as the first argument
    let cfg = match std::env::args().nth(1) {
        Some(path) => config::Config::load_from(&path)?,
        None => config::Config::load()?,
    };

    // Build the Tokio runtime, sized by the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let logger = Arc::new(logger::Logger::from_config(&cfg.logging)?);

    let listener = match server::create_reusable_listener(addr) {
        Ok(l) => l,
        Err(e) => {
            logger.error(&format!("Failed to bind {addr}: {e}"));
            return Err(e.into());
        }
    };

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals), Arc::clone(&logger))?;

    let state = Arc::new(config::AppState::new(cfg, logger));
    server::start_server_loop(listener, Arc::clone(&state), Arc::clone(&signals.shutdown)).await?;

    wait_for_connections(&state, SHUTDOWN_GRACE).await;
    Ok(())
}

/// Wait until active connections reach zero or `grace` elapses
async fn wait_for_connections(state: &config::AppState, grace: Duration) {
    let deadline = tokio::time::Instant::now() + grace;
    loop {
        let active = state.active_connections.load(Ordering::SeqCst);
        if active == 0 {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            state
                .logger
                .warn(&format!("Exiting with {active} connection(s) still open"));
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
