use std::sync::Arc;

use sra_core::config::AppConfig;

/// Shared handler state. Cloned per request; the config is never mutated.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
