//! EventDesk
//!
//! Role-aware client for the event management dashboard API. This library
//! provides the session, the access policy and routing gate, list filtering,
//! and the event, venue, attendance and feedback views with their actions.

pub mod actions;
pub mod config;
pub mod filters;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventDeskError, Result};

// Re-export main components for easy access
pub use middleware::{GateDecision, RouteGate};
pub use services::ServiceFactory;
pub use state::{AppContext, CredentialStore, SessionContext};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
