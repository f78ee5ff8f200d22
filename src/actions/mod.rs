//! Mutating actions on events
//!
//! Each action has a local precondition check that runs before any request
//! and an [`EventPatch`] that is applied to the local copy only after the
//! server accepted the request.

pub mod patch;

pub use patch::{settle, EventPatch};

use chrono::{DateTime, Utc};
use crate::models::{Event, MarkAttendanceRequest, SubmitFeedbackRequest};
use crate::utils::errors::{EventDeskError, Result};

/// State of the registration control, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    AlreadyRegistered,
    AtCapacity,
    EventPast,
    Open,
}

impl RegistrationState {
    pub fn of(event: &Event, now: DateTime<Utc>) -> Self {
        if event.is_registered {
            RegistrationState::AlreadyRegistered
        } else if event.is_full() {
            RegistrationState::AtCapacity
        } else if event.is_past(now) {
            RegistrationState::EventPast
        } else {
            RegistrationState::Open
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RegistrationState::AlreadyRegistered => "you are registered for this event",
            RegistrationState::AtCapacity => "event has reached capacity",
            RegistrationState::EventPast => "this event has already taken place",
            RegistrationState::Open => "register now",
        }
    }

    pub fn is_open(&self) -> bool {
        *self == RegistrationState::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceState {
    AlreadyMarked,
    NotYetHeld,
    Open,
}

impl AttendanceState {
    pub fn of(event: &Event, now: DateTime<Utc>) -> Self {
        if event.has_attended {
            AttendanceState::AlreadyMarked
        } else if !event.is_past(now) {
            AttendanceState::NotYetHeld
        } else {
            AttendanceState::Open
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceState::AlreadyMarked => "attendance recorded",
            AttendanceState::NotYetHeld => "attendance opens after the event",
            AttendanceState::Open => "mark attendance",
        }
    }

    pub fn is_open(&self) -> bool {
        *self == AttendanceState::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackState {
    AlreadySubmitted,
    NotAvailableYet,
    NotAttended,
    Open,
}

impl FeedbackState {
    pub fn of(event: &Event, now: DateTime<Utc>) -> Self {
        if event.has_feedback {
            FeedbackState::AlreadySubmitted
        } else if !event.is_past(now) {
            FeedbackState::NotAvailableYet
        } else if !event.has_attended {
            FeedbackState::NotAttended
        } else {
            FeedbackState::Open
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedbackState::AlreadySubmitted => "you have already submitted feedback",
            FeedbackState::NotAvailableYet => "feedback opens after the event",
            FeedbackState::NotAttended => "only attendees can give feedback",
            FeedbackState::Open => "give feedback",
        }
    }

    pub fn is_open(&self) -> bool {
        *self == FeedbackState::Open
    }
}

pub fn check_registration(event: &Event, now: DateTime<Utc>) -> Result<()> {
    match RegistrationState::of(event, now) {
        RegistrationState::Open => Ok(()),
        blocked => Err(EventDeskError::ActionBlocked(blocked.label().to_string())),
    }
}

/// An empty code is reported before the event state
pub fn check_attendance(event: &Event, request: &MarkAttendanceRequest, now: DateTime<Utc>) -> Result<()> {
    if request.code.trim().is_empty() {
        return Err(EventDeskError::Validation("Please enter the attendance code".to_string()));
    }
    match AttendanceState::of(event, now) {
        AttendanceState::Open => Ok(()),
        blocked => Err(EventDeskError::ActionBlocked(blocked.label().to_string())),
    }
}

pub fn check_feedback(event: &Event, request: &SubmitFeedbackRequest, now: DateTime<Utc>) -> Result<()> {
    match FeedbackState::of(event, now) {
        FeedbackState::Open => request.validate().map_err(EventDeskError::Validation),
        blocked => Err(EventDeskError::ActionBlocked(blocked.label().to_string())),
    }
}
