//! Profile view and account actions

use std::fmt::Write;
use crate::models::{ChangePasswordRequest, UpdateProfileRequest, UserProfile};
use crate::state::AppContext;
use crate::utils::helpers::{capitalize, initials};
use super::{Loadable, Notice, Outcome};

pub const PASSWORD_MISMATCH: &str = "New passwords do not match";

pub fn render_profile(profile: &UserProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", initials(&profile.name), profile.name);
    let _ = writeln!(out, "  {}", profile.email);
    let _ = writeln!(out, "  {}", capitalize(profile.role.as_str()));
    if let Some(phone) = profile.phone.as_deref().filter(|p| !p.is_empty()) {
        let _ = writeln!(out, "  {}", phone);
    }
    if let Some(bio) = profile.bio.as_deref().filter(|b| !b.is_empty()) {
        let _ = writeln!(out, "\n{}", bio);
    }
    out
}

pub async fn load_profile(ctx: &AppContext) -> Loadable<UserProfile> {
    Loadable::load(ctx.services.user_service.profile().await, "profile", "Failed to load profile")
}

pub async fn update_profile(ctx: &AppContext, request: &UpdateProfileRequest) -> Outcome {
    let Some(_ticket) = ctx.in_flight.try_acquire("update-profile", ctx.user_id()) else {
        return Outcome::Busy;
    };

    match ctx.services.user_service.update_profile(request).await {
        Ok(_) => Outcome::done(Notice::success("Profile updated", "Your profile has been saved")),
        Err(e) => Outcome::from_error(&e, "Update failed", "Failed to update profile"),
    }
}

/// Change the password; `confirm` must repeat the new password
pub async fn change_password(ctx: &AppContext, current: &str, new: &str, confirm: &str) -> Outcome {
    if new != confirm {
        return Outcome::Invalid(PASSWORD_MISMATCH.to_string());
    }

    let Some(_ticket) = ctx.in_flight.try_acquire("change-password", ctx.user_id()) else {
        return Outcome::Busy;
    };

    let request = ChangePasswordRequest {
        current_password: current.to_string(),
        new_password: new.to_string(),
    };
    match ctx.services.user_service.change_password(&request).await {
        Ok(()) => Outcome::done(Notice::success("Password changed", "Your password has been updated")),
        Err(e) => Outcome::from_error(&e, "Password change failed", "Failed to change password"),
    }
}
