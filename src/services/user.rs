//! User profile service
//!
//! Profile read/update and password change for the signed-in user.

use tracing::{debug, info};
use crate::models::{ChangePasswordRequest, UpdateProfileRequest, UserProfile};
use crate::services::api::ApiClient;
use crate::utils::errors::{EventDeskError, Result};

#[derive(Debug, Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn profile(&self) -> Result<UserProfile> {
        debug!("Fetching profile");
        self.api.get(&["api", "user", "profile"]).await
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<UserProfile> {
        if request.name.trim().is_empty() {
            return Err(EventDeskError::Validation("Name is required".to_string()));
        }
        let profile: UserProfile = self.api.put(&["api", "user", "profile"], request).await?;
        info!(user_id = %profile.id, "Profile updated");
        Ok(profile)
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()> {
        if request.current_password.is_empty() || request.new_password.is_empty() {
            return Err(EventDeskError::Validation("Both passwords are required".to_string()));
        }
        self.api
            .post_for_status(&["api", "user", "change-password"], request)
            .await?;
        info!("Password changed");
        Ok(())
    }
}
