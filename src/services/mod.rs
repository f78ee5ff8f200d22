//! Services module
//!
//! This module contains the access policy and the API-backed services

pub mod access;
pub mod api;
pub mod attendance;
pub mod events;
pub mod feedback;
pub mod user;
pub mod venues;

// Re-export commonly used services
pub use access::{AccessContext, Access, Capability, Route, can_access, capabilities};
pub use api::ApiClient;
pub use attendance::AttendanceService;
pub use events::EventService;
pub use feedback::FeedbackService;
pub use user::UserService;
pub use venues::VenueService;

use crate::config::Settings;
use crate::state::SessionContext;
use crate::utils::errors::Result;

/// Service factory for creating all API-backed services for one session
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub venue_service: VenueService,
    pub attendance_service: AttendanceService,
    pub feedback_service: FeedbackService,
    pub user_service: UserService,
}

impl ServiceFactory {
    /// Create all services, sharing one client authenticated as `session`
    pub fn new(settings: &Settings, session: &SessionContext) -> Result<Self> {
        let api = ApiClient::new(settings, session.credential())?;

        Ok(Self {
            event_service: EventService::new(api.clone()),
            venue_service: VenueService::new(api.clone()),
            attendance_service: AttendanceService::new(api.clone()),
            feedback_service: FeedbackService::new(api.clone()),
            user_service: UserService::new(api),
        })
    }
}
