//! Data models module
//!
//! This module contains all data structures exchanged with the dashboard API

pub mod user;
pub mod event;
pub mod venue;
pub mod feedback;

// Re-export commonly used models
pub use user::{Role, Identity, UserProfile, UpdateProfileRequest, ChangePasswordRequest};
pub use event::{Event, Organizer, EventQuery, CreateEventRequest, MarkAttendanceRequest, parse_event_date};
pub use venue::{Venue, CreateVenueRequest};
pub use feedback::{Feedback, SubmitFeedbackRequest};

use serde::Deserialize;

/// Body of a created resource; only the id is needed to navigate to it
#[derive(Debug, Clone, Deserialize)]
pub struct Created {
    pub id: String,
}
