//! Feedback model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    #[serde(default)]
    pub event_id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    pub rating: u8,
    pub comment: String,
}

impl SubmitFeedbackRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(format!("Rating must be between {} and {}", MIN_RATING, MAX_RATING));
        }
        if self.comment.trim().is_empty() {
            return Err("Comment is required".to_string());
        }
        Ok(())
    }
}
