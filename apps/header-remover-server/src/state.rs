//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::redact::RedactionOptions;

/// Shared application state
///
/// Read-only after startup; every request opens its own document.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Options used for fields a request leaves out
    pub fn default_options(&self) -> RedactionOptions {
        let redaction = &self.inner.config.redaction;
        RedactionOptions {
            band_mm: redaction.band_mm,
            margin_mm: redaction.margin_mm,
            ignore_case: false,
            merge_strategy: redaction.merge_strategy,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
