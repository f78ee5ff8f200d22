//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the EventDesk application.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::LoggingConfig;
use crate::utils::errors::{EventDeskError, Result};

/// Initialize logging based on configuration.
///
/// Console output goes to stderr so rendered views on stdout stay clean.
/// The returned guard must be held for the lifetime of the program when
/// file logging is enabled, otherwise buffered lines are lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| EventDeskError::Config(format!("Invalid log filter {}: {}", config.level, e)))?;

    let (file_layer, guard) = if config.file_path.is_empty() {
        (None, None)
    } else {
        let file_appender = tracing_appender::rolling::daily(&config.file_path, "eventdesk.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        (
            Some(fmt::layer().with_ansi(false).with_writer(non_blocking)),
            Some(guard),
        )
    };

    let json_layer = config
        .json
        .then(|| fmt::layer().json().with_writer(std::io::stderr));
    let plain_layer = (!config.json).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(plain_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| EventDeskError::Config(format!("Logging already initialized: {}", e)))?;

    debug!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a routing decision
pub fn log_navigation(path: &str, role: Option<&str>, decision: &str) {
    debug!(
        path = path,
        role = role,
        decision = decision,
        "Navigation evaluated"
    );
}

/// Log a denied navigation
pub fn log_navigation_denied(path: &str, role: Option<&str>, redirect: &str) {
    warn!(
        path = path,
        role = role,
        redirect = redirect,
        "Navigation denied"
    );
}

/// Log event management actions
pub fn log_event_action(event_id: &str, action: &str, user_id: &str, details: Option<&str>) {
    info!(
        event_id = event_id,
        action = action,
        user_id = user_id,
        details = details,
        "Event action performed"
    );
}

/// Log destructive or privileged actions
pub fn log_privileged_action(user_id: &str, role: &str, action: &str, target: Option<&str>) {
    warn!(
        user_id = user_id,
        role = role,
        action = action,
        target = target,
        "Privileged action performed"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log a completed API request
pub fn log_request(method: &str, path: &str, status: Option<u16>, duration_ms: u64, success: bool) {
    if success {
        debug!(
            method = method,
            path = path,
            status = status,
            duration_ms = duration_ms,
            "API request completed"
        );
    } else {
        warn!(
            method = method,
            path = path,
            status = status,
            duration_ms = duration_ms,
            "API request failed"
        );
    }
}
