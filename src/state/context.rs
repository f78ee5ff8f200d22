//! Application context
//!
//! Everything a view needs for one authenticated navigation: settings, the
//! session, its resolved capabilities, the API services and the in-flight
//! guard for submissions.

use crate::config::Settings;
use crate::middleware::InFlightGuard;
use crate::models::Identity;
use crate::services::{AccessContext, ServiceFactory};
use crate::utils::errors::Result;
use super::session::SessionContext;

#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub session: SessionContext,
    pub access: AccessContext,
    pub services: ServiceFactory,
    pub in_flight: InFlightGuard,
}

impl AppContext {
    pub fn new(settings: Settings, session: SessionContext) -> Result<Self> {
        let services = ServiceFactory::new(&settings, &session)?;
        let access = AccessContext::new(session.identity().clone());

        Ok(Self {
            settings,
            session,
            access,
            services,
            in_flight: InFlightGuard::new(),
        })
    }

    pub fn identity(&self) -> &Identity {
        self.session.identity()
    }

    pub fn user_id(&self) -> &str {
        &self.session.identity().id
    }
}
