//! Error handling for EventDesk
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Message shown when neither the server nor the caller has anything better.
pub const GENERIC_FAILURE_MESSAGE: &str = "Please try again";

/// Main error type for EventDesk
#[derive(Error, Debug)]
pub enum EventDeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dashboard API error: {0}")]
    Api(#[from] ApiError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Action not available: {0}")]
    ActionBlocked(String),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Credential decoding error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Failures reported by, or while talking to, the dashboard API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    #[error("API request timed out")]
    Timeout,

    #[error("API unreachable: {0}")]
    Unreachable(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type alias for EventDesk operations
pub type Result<T> = std::result::Result<T, EventDeskError>;

/// Result type alias for raw API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl EventDeskError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            EventDeskError::Config(_) => false,
            EventDeskError::Api(ApiError::Server { status, .. }) => *status >= 500,
            EventDeskError::Api(_) => true,
            EventDeskError::Http(_) => true,
            EventDeskError::Validation(_) => true,
            EventDeskError::Authentication(_) => false,
            EventDeskError::PermissionDenied(_) => false,
            EventDeskError::ActionBlocked(_) => false,
            EventDeskError::NotFound { .. } => false,
            EventDeskError::Token(_) => false,
            EventDeskError::Serialization(_) => false,
            EventDeskError::Io(_) => true,
            EventDeskError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventDeskError::Config(_) => ErrorSeverity::Critical,
            EventDeskError::Authentication(_) => ErrorSeverity::Warning,
            EventDeskError::PermissionDenied(_) => ErrorSeverity::Warning,
            EventDeskError::Token(_) => ErrorSeverity::Warning,
            EventDeskError::Validation(_) => ErrorSeverity::Info,
            EventDeskError::ActionBlocked(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Which branch of the failure taxonomy this error belongs to
    pub fn kind(&self) -> FailureKind {
        match self {
            EventDeskError::Validation(_) | EventDeskError::ActionBlocked(_) => FailureKind::Validation,
            EventDeskError::Authentication(_)
            | EventDeskError::PermissionDenied(_)
            | EventDeskError::Token(_)
            | EventDeskError::Api(ApiError::Server { status: 401, .. }) => FailureKind::Auth,
            _ => FailureKind::NetworkOrServer,
        }
    }

    /// Human-readable message for the user.
    ///
    /// Server-reported reasons win; transport failures fall back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            EventDeskError::Api(ApiError::Server { message: Some(message), .. }) if !message.trim().is_empty() => {
                message.clone()
            }
            EventDeskError::Validation(message)
            | EventDeskError::ActionBlocked(message)
            | EventDeskError::PermissionDenied(message)
            | EventDeskError::Authentication(message) => message.clone(),
            _ if fallback.is_empty() => GENERIC_FAILURE_MESSAGE.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Failure taxonomy used by the views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Fetch rejected or non-2xx; shown as an error state
    NetworkOrServer,
    /// Client-side precondition; shown inline before any request
    Validation,
    /// Missing/invalid credential or role mismatch; handled by redirect
    Auth,
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
