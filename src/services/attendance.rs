//! Attendance service

use tracing::info;
use crate::models::MarkAttendanceRequest;
use crate::services::api::ApiClient;
use crate::utils::errors::{EventDeskError, Result};

#[derive(Debug, Clone)]
pub struct AttendanceService {
    api: ApiClient,
}

impl AttendanceService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Submit the one-time attendance code for an event
    pub async fn mark(&self, event_id: &str, request: &MarkAttendanceRequest) -> Result<()> {
        if request.code.trim().is_empty() {
            return Err(EventDeskError::Validation("Please enter the attendance code".to_string()));
        }
        self.api.post_for_status(&["api", "attendance", event_id], request).await?;
        info!(event_id = event_id, "Attendance marked");
        Ok(())
    }
}
