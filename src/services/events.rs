//! Event service
//!
//! Event collection, detail and registration endpoints.

use tracing::{debug, info};
use crate::models::{CreateEventRequest, Created, Event, EventQuery};
use crate::services::api::ApiClient;
use crate::utils::errors::{EventDeskError, Result};

#[derive(Debug, Clone)]
pub struct EventService {
    api: ApiClient,
}

impl EventService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List events, narrowed server-side by `query`
    pub async fn list(&self, query: &EventQuery) -> Result<Vec<Event>> {
        debug!(query = ?query, "Fetching events");
        let events: Vec<Event> = self.api.get_with_query(&["api", "event"], query).await?;
        debug!(count = events.len(), "Fetched events");
        Ok(events)
    }

    pub async fn get(&self, event_id: &str) -> Result<Event> {
        debug!(event_id = event_id, "Fetching event");
        self.api.get(&["api", "event", event_id]).await
    }

    /// Create an event; the form is validated before anything is sent
    pub async fn create(&self, request: &CreateEventRequest) -> Result<Created> {
        request.validate().map_err(EventDeskError::Validation)?;
        let created: Created = self.api.post(&["api", "event"], request).await?;
        info!(event_id = %created.id, title = %request.title, "Event created");
        Ok(created)
    }

    pub async fn delete(&self, event_id: &str) -> Result<()> {
        self.api.delete(&["api", "event", event_id]).await?;
        info!(event_id = event_id, "Event deleted");
        Ok(())
    }

    pub async fn register(&self, event_id: &str) -> Result<()> {
        self.api
            .post_for_status(&["api", "event", event_id, "register"], &serde_json::json!({}))
            .await?;
        info!(event_id = event_id, "Registered for event");
        Ok(())
    }
}
