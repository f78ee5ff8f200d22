//! Navigation scenarios: stored credential, routing gate and logout

use eventdesk::middleware::{GateDecision, RouteGate, LOGIN_PATH, UNAUTHORIZED_PATH};
use eventdesk::models::Role;
use eventdesk::state::{AppContext, SessionContext};
use eventdesk::handlers::dashboard;
use chrono::Utc;

use crate::fixtures::event_catalogue;
use crate::helpers::{create_expired_token, create_test_token};
use crate::integration::setup_integration_test;

#[tokio::test]
async fn test_login_navigate_logout() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    let gate = RouteGate::new();

    // nothing stored yet
    let stored = ctx.store.load().await.expect("Store should be readable");
    assert_eq!(gate.evaluate("/dashboard", stored.as_deref()).redirect(), Some(LOGIN_PATH));

    let token = create_test_token("m1", "Maya Manager", "manager");
    SessionContext::login(&ctx.store, &token).await.expect("Login should succeed");

    let stored = ctx.store.load().await.expect("Store should be readable");
    let decision = gate.evaluate("/venues/create", stored.as_deref());
    assert!(decision.proceeds());
    assert_eq!(gate.evaluate("/admin", stored.as_deref()), GateDecision::Denied(Role::Manager));
    assert_eq!(gate.evaluate("/admin", stored.as_deref()).redirect(), Some(UNAUTHORIZED_PATH));

    let session = SessionContext::init(&ctx.store)
        .await
        .expect("Init should succeed")
        .expect("Session should be restored");
    assert_eq!(session.identity().name, "Maya Manager");
    session.logout(&ctx.store).await.expect("Logout should succeed");

    assert!(SessionContext::init(&ctx.store).await.expect("Init should succeed").is_none());
    let stored = ctx.store.load().await.expect("Store should be readable");
    assert_eq!(gate.evaluate("/venues/create", stored.as_deref()), GateDecision::Unauthenticated);
}

#[tokio::test]
async fn test_expired_credential_is_unauthenticated() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.store.save(&create_expired_token("admin")).await.expect("Save should succeed");

    assert!(SessionContext::init(&ctx.store).await.expect("Init should succeed").is_none());

    let stored = ctx.store.load().await.expect("Store should be readable");
    let decision = RouteGate::new().evaluate("/events", stored.as_deref());
    assert_eq!(decision.redirect(), Some(LOGIN_PATH));
    // public pages still open
    assert!(RouteGate::new().evaluate("/login", stored.as_deref()).proceeds());
}

#[tokio::test]
async fn test_gate_session_drives_dashboard() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.api.mock_get("/api/event", event_catalogue()).await;
    ctx.api
        .mock_get_with_query("/api/event", "registered", "true", serde_json::json!([]))
        .await;

    let token = create_test_token("o1", "Omar Organizer", "organizer");
    let session = RouteGate::new()
        .evaluate("/dashboard", Some(&token))
        .into_session()
        .expect("Organizer should reach the dashboard");

    let app = AppContext::new(ctx.settings.clone(), session).expect("Failed to build app context");
    let view = dashboard::dashboard(&app, Utc::now()).await;
    let view = view.ready().expect("Dashboard should load");

    let ids: Vec<_> = view.upcoming.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e-upcoming", "e-full", "e-later"]);
    assert_eq!(view.registered_count, 0);

    let rendered = view.render();
    assert!(rendered.contains("Welcome back, Omar Organizer (Organizer)"));
    assert!(rendered.contains("/events/create"));
    assert!(!rendered.contains("/admin"));
}
