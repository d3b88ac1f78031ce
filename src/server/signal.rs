// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)
// - SIGUSR1: Reopen log files (after external rotation)

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger::Logger;

/// Signal handler state
pub struct SignalHandler {
    /// Shutdown signal (SIGTERM, SIGINT)
    pub shutdown: Arc<Notify>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Request shutdown; the server loop observes it at its next poll
    pub fn request_shutdown(&self) {
        // notify_one stores a permit if the loop is not waiting yet
        self.shutdown.notify_one();
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Start signal handlers (Unix only)
///
/// Registers the signals up front so registration failures reach the caller,
/// then spawns a background task that reacts to them.
///
/// | Signal  | Action           |
/// |---------|------------------|
/// | SIGTERM | Graceful stop    |
/// | SIGINT  | Graceful stop    |
/// | SIGUSR1 | Reopen log files |
#[cfg(unix)]
pub fn start_signal_handler(
    handler: Arc<SignalHandler>,
    logger: Arc<Logger>,
) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigusr1 = signal(SignalKind::user_defined1())?;

    logger.debug(&format!(
        "Signal handlers registered (SIGTERM, SIGINT, SIGUSR1), pid {}",
        std::process::id()
    ));

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    logger.info("SIGTERM received, initiating graceful shutdown");
                    handler.request_shutdown();
                    break;
                }

                _ = sigint.recv() => {
                    logger.info("SIGINT received, initiating graceful shutdown");
                    handler.request_shutdown();
                    break;
                }

                _ = sigusr1.recv() => {
                    match logger.reopen() {
                        Ok(()) => logger.info("SIGUSR1 received, log files reopened"),
                        Err(e) => logger.error(&format!("Failed to reopen log files: {e}")),
                    }
                }
            }
        }
    });

    Ok(())
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(
    handler: Arc<SignalHandler>,
    logger: Arc<Logger>,
) -> std::io::Result<()> {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger.info("Ctrl+C received, initiating graceful shutdown");
            handler.request_shutdown();
        }
    });
    Ok(())
}
