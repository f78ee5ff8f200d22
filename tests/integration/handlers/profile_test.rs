//! Profile view and account action tests

use assert_matches::assert_matches;
use eventdesk::handlers::{profile, Outcome};
use eventdesk::models::{Role, UpdateProfileRequest};

use crate::helpers::profile_json;
use crate::integration::setup_integration_test;

#[tokio::test]
async fn test_load_and_render_profile() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.api.mock_get("/api/user/profile", profile_json("u1", "Ada Lovelace", "manager")).await;
    let app = ctx.app_context("u1", Role::Manager);

    let loaded = profile::load_profile(&app).await;
    let current = loaded.ready().expect("Profile should load");
    let rendered = profile::render_profile(current);
    assert!(rendered.starts_with("[AL] Ada Lovelace"));
    assert!(rendered.contains("Manager"));
}

#[tokio::test]
async fn test_update_profile() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.api.mock_json("PUT", "/api/user/profile", 200, profile_json("u1", "Ada King", "manager")).await;
    let app = ctx.app_context("u1", Role::Manager);

    let request = UpdateProfileRequest {
        name: "Ada King".into(),
        bio: "Dancer".into(),
        phone: String::new(),
    };
    assert!(profile::update_profile(&app, &request).await.is_success());

    let blank = UpdateProfileRequest { name: " ".into(), ..request };
    assert_eq!(profile::update_profile(&app, &blank).await, Outcome::Invalid("Name is required".into()));
}

#[tokio::test]
async fn test_change_password_mismatch_is_inline() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.api.mock_ok("POST", "/api/user/change-password").await;
    let app = ctx.app_context("u1", Role::Attendee);

    let outcome = profile::change_password(&app, "old", "new-one", "new-two").await;
    assert_eq!(outcome, Outcome::Invalid(profile::PASSWORD_MISMATCH.into()));
    assert_eq!(ctx.api.count("POST", "/api/user/change-password").await, 0);

    assert!(profile::change_password(&app, "old", "new-one", "new-one").await.is_success());
}

#[tokio::test]
async fn test_change_password_wrong_current() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.api
        .mock_error("POST", "/api/user/change-password", 400, Some("Current password is incorrect"))
        .await;
    let app = ctx.app_context("u1", Role::Attendee);

    let outcome = profile::change_password(&app, "bad", "new-one", "new-one").await;
    assert_matches!(outcome, Outcome::Failed(notice) if notice.description == "Current password is incorrect");
}
