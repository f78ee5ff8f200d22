//! View handlers
//!
//! One module per dashboard area. Views fetch on entry and return either the
//! loaded data or an error state; actions return an [`Outcome`] that carries
//! the notice to show and where to navigate next.

pub mod attendance;
pub mod dashboard;
pub mod events;
pub mod feedback;
pub mod profile;
pub mod venues;

use std::fmt;
use crate::middleware::{LOGIN_PATH, UNAUTHORIZED_PATH};
use crate::utils::errors::{ApiError, EventDeskError, FailureKind, Result};
use crate::utils::logging::log_api_error;

pub const BUSY_MESSAGE: &str = "This request is already being processed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Success,
    Error,
}

/// Short message shown after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Success,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Error,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{}: {}", self.title, self.description)
        }
    }
}

/// A fetched view: either ready, or in its error state
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Ready(T),
    Failed(String),
}

impl<T> Loadable<T> {
    /// Turn a fetch result into a view state; the error is logged, never raised
    pub fn load(result: Result<T>, view: &str, fallback: &str) -> Self {
        match result {
            Ok(data) => Loadable::Ready(data),
            Err(e) => {
                let severity = e.severity().to_string();
                log_api_error(view, &e.to_string(), Some(&severity));
                Loadable::Failed(e.user_message(fallback))
            }
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Loadable::Ready(data) => Loadable::Ready(f(data)),
            Loadable::Failed(message) => Loadable::Failed(message),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(data) => Some(data),
            Loadable::Failed(_) => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Ready(data) => Some(data),
            Loadable::Failed(_) => None,
        }
    }
}

/// Result of a submitted action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done { notice: Notice, redirect: Option<String> },
    /// The server or the network refused; local state is unchanged
    Failed(Notice),
    /// Rejected before any request was sent
    Invalid(String),
    /// The same submission is still in flight
    Busy,
    Redirect(String),
}

impl Outcome {
    pub fn done(notice: Notice) -> Self {
        Outcome::Done { notice, redirect: None }
    }

    pub fn done_and_go(notice: Notice, redirect: impl Into<String>) -> Self {
        Outcome::Done {
            notice,
            redirect: Some(redirect.into()),
        }
    }

    /// Map an error onto the failure taxonomy
    pub fn from_error(error: &EventDeskError, title: &str, fallback: &str) -> Self {
        match error.kind() {
            FailureKind::Validation => Outcome::Invalid(error.user_message(fallback)),
            FailureKind::Auth => match error {
                EventDeskError::PermissionDenied(_) | EventDeskError::Api(ApiError::Server { status: 403, .. }) => {
                    Outcome::Redirect(UNAUTHORIZED_PATH.to_string())
                }
                _ => Outcome::Redirect(LOGIN_PATH.to_string()),
            },
            FailureKind::NetworkOrServer => Outcome::Failed(Notice::error(title, error.user_message(fallback))),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Done { .. })
    }

    pub fn redirect(&self) -> Option<&str> {
        match self {
            Outcome::Done { redirect, .. } => redirect.as_deref(),
            Outcome::Redirect(target) => Some(target),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Done { notice, .. } | Outcome::Failed(notice) => write!(f, "{}", notice),
            Outcome::Invalid(message) => write!(f, "{}", message),
            Outcome::Busy => write!(f, "{}", BUSY_MESSAGE),
            Outcome::Redirect(target) => write!(f, "Redirecting to {}", target),
        }
    }
}
