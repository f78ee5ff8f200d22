//! Venue service

use tracing::{debug, info};
use crate::models::{CreateVenueRequest, Created, Venue};
use crate::services::api::ApiClient;
use crate::utils::errors::{EventDeskError, Result};

#[derive(Debug, Clone)]
pub struct VenueService {
    api: ApiClient,
}

impl VenueService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Venue>> {
        let venues: Vec<Venue> = self.api.get(&["api", "venue"]).await?;
        debug!(count = venues.len(), "Fetched venues");
        Ok(venues)
    }

    pub async fn get(&self, venue_id: &str) -> Result<Venue> {
        debug!(venue_id = venue_id, "Fetching venue");
        self.api.get(&["api", "venue", venue_id]).await
    }

    pub async fn create(&self, request: &CreateVenueRequest) -> Result<Created> {
        request.validate().map_err(EventDeskError::Validation)?;
        let created: Created = self.api.post(&["api", "venue"], request).await?;
        info!(venue_id = %created.id, name = %request.name, "Venue created");
        Ok(created)
    }

    pub async fn delete(&self, venue_id: &str) -> Result<()> {
        self.api.delete(&["api", "venue", venue_id]).await?;
        info!(venue_id = venue_id, "Venue deleted");
        Ok(())
    }
}
