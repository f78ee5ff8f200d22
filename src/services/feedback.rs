//! Feedback service

use tracing::{debug, info};
use crate::models::{Feedback, SubmitFeedbackRequest};
use crate::services::api::ApiClient;
use crate::utils::errors::{ApiError, EventDeskError, Result};

#[derive(Debug, Clone)]
pub struct FeedbackService {
    api: ApiClient,
}

impl FeedbackService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The caller's feedback for an event. `None` when nothing was submitted yet.
    pub async fn get(&self, event_id: &str) -> Result<Option<Feedback>> {
        match self.api.get(&["api", "feedback", event_id]).await {
            Ok(feedback) => Ok(Some(feedback)),
            Err(EventDeskError::Api(ApiError::Server { status: 404, .. })) => {
                debug!(event_id = event_id, "No feedback submitted yet");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn submit(&self, event_id: &str, request: &SubmitFeedbackRequest) -> Result<Feedback> {
        request.validate().map_err(EventDeskError::Validation)?;
        let feedback: Feedback = self.api.post(&["api", "feedback", event_id], request).await?;
        info!(event_id = event_id, rating = request.rating, "Feedback submitted");
        Ok(feedback)
    }
}
