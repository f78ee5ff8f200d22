//! Routing gate
//!
//! Every navigation passes through [`RouteGate::evaluate`] exactly once. The
//! decision is synchronous and never retried: public routes proceed, a
//! missing or undecodable credential redirects to the login page, and a
//! role that the route does not list redirects to the unauthorized page.

use tracing::debug;
use crate::models::Role;
use crate::services::access::{access_for_path, Access, Route};
use crate::state::SessionContext;
use crate::utils::logging::{log_navigation, log_navigation_denied};

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Outcome of one navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Public route; the session is passed along when there is one
    Public(Option<SessionContext>),
    /// Authenticated and allowed
    Allowed(SessionContext),
    /// No usable credential; redirect to login
    Unauthenticated,
    /// Authenticated but the role is not listed; redirect to unauthorized
    Denied(Role),
}

impl GateDecision {
    /// Where the navigation should be redirected, if anywhere
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            GateDecision::Public(_) | GateDecision::Allowed(_) => None,
            GateDecision::Unauthenticated => Some(LOGIN_PATH),
            GateDecision::Denied(_) => Some(UNAUTHORIZED_PATH),
        }
    }

    pub fn proceeds(&self) -> bool {
        self.redirect().is_none()
    }

    pub fn session(&self) -> Option<&SessionContext> {
        match self {
            GateDecision::Public(session) => session.as_ref(),
            GateDecision::Allowed(session) => Some(session),
            _ => None,
        }
    }

    pub fn into_session(self) -> Option<SessionContext> {
        match self {
            GateDecision::Public(session) => session,
            GateDecision::Allowed(session) => Some(session),
            _ => None,
        }
    }
}

/// Navigation gate
#[derive(Debug, Clone, Default)]
pub struct RouteGate;

impl RouteGate {
    pub fn new() -> Self {
        Self
    }

    /// Decide a navigation to `path` given the raw bearer credential, if any
    pub fn evaluate(&self, path: &str, credential: Option<&str>) -> GateDecision {
        let session = credential.and_then(|token| match SessionContext::from_credential(token) {
            Ok(session) => Some(session),
            Err(e) => {
                debug!(path = path, error = %e, "Credential rejected at gate");
                None
            }
        });

        let role = session.as_ref().map(|s| s.role());
        let role_name = role.map(|r| r.as_str());

        let decision = match (access_for_path(path), session) {
            (Access::Public, session) => GateDecision::Public(session),
            (_, None) => GateDecision::Unauthenticated,
            (Access::Authenticated, Some(session)) => GateDecision::Allowed(session),
            (Access::Roles(allowed), Some(session)) => {
                if allowed.contains(&session.role()) {
                    GateDecision::Allowed(session)
                } else {
                    GateDecision::Denied(session.role())
                }
            }
        };

        match decision.redirect() {
            Some(target) => log_navigation_denied(path, role_name, target),
            None => log_navigation(path, role_name, "proceed"),
        }

        decision
    }

    /// Same as [`RouteGate::evaluate`] for an already parsed route
    pub fn evaluate_route(&self, route: &Route, credential: Option<&str>) -> GateDecision {
        self.evaluate(&route.path(), credential)
    }
}
