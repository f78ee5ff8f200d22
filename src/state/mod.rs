//! State management module
//!
//! This module handles the session, the stored credential and the
//! per-navigation application context

pub mod context;
pub mod session;
pub mod storage;

// Re-export commonly used state components
pub use context::AppContext;
pub use session::SessionContext;
pub use storage::CredentialStore;
