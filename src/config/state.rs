// Application state module
// Immutable values shared by every connection task

use super::root::DocumentRoot;
use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    pub root: DocumentRoot,
}

impl AppState {
    pub const fn new(config: Config, root: DocumentRoot) -> Self {
        Self { config, root }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
