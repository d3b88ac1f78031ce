// Application state module
// Shared, read-only state handed to every connection

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use super::types::Config;
use crate::logger::Logger;

/// Application state
pub struct AppState {
    pub config: Config,
    pub logger: Arc<Logger>,
    /// Connections currently being served
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub fn new(config: Config, logger: Arc<Logger>) -> Self {
        Self {
            config,
            logger,
            active_connections: AtomicUsize::new(0),
        }
    }
}
