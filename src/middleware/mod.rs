//! Middleware module
//!
//! This module contains middleware for navigation and request processing

pub mod auth;
pub mod in_flight;
pub mod logging;

// Re-export commonly used middleware
pub use auth::{RouteGate, GateDecision, LOGIN_PATH, UNAUTHORIZED_PATH};
pub use in_flight::{InFlightGuard, InFlightTicket};
pub use logging::{RequestLogger, RequestTimer};
