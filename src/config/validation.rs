//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, state code shape)
//! - Check persistence settings are complete when enabled
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the loaded config

use crate::config::schema::MonitorConfig;

/// One semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the configuration, collecting every error.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut fail = |field: &'static str, message: String| {
        errors.push(ValidationError { field, message });
    };

    if !config.probe.url.starts_with("http://") && !config.probe.url.starts_with("https://") {
        fail("probe.url", "must be an http(s) URL".into());
    }
    if config.probe.timeout_secs == 0 {
        fail("probe.timeout_secs", "must be greater than zero".into());
    }
    if config.probe.latency_threshold_ms == 0 {
        fail("probe.latency_threshold_ms", "must be greater than zero".into());
    }

    if !config.portal.url.starts_with("http://") && !config.portal.url.starts_with("https://") {
        fail("portal.url", "must be an http(s) URL".into());
    }
    if config.portal.timeout_secs == 0 {
        fail("portal.timeout_secs", "must be greater than zero".into());
    }

    let state = &config.critical.state;
    if state.len() != 2 || !state.chars().all(|c| c.is_ascii_uppercase()) {
        fail(
            "critical.state",
            format!("'{}' is not a two-letter uppercase jurisdiction code", state),
        );
    }

    if config.persistence.enabled {
        if config.persistence.rest_url.is_empty() {
            fail("persistence.rest_url", "required when persistence is enabled".into());
        }
        if config.persistence.table.is_empty() {
            fail("persistence.table", "required when persistence is enabled".into());
        }
    }

    if config.service.history_limit == 0 {
        fail("service.history_limit", "must be greater than zero".into());
    }
    if config.service.freshness_window_secs == 0 {
        fail("service.freshness_window_secs", "must be greater than zero".into());
    }
    if config.listener.request_timeout_secs
        <= config.probe.timeout_secs.max(config.portal.timeout_secs)
    {
        fail(
            "listener.request_timeout_secs",
            "must exceed both the probe and portal timeout budgets".into(),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
