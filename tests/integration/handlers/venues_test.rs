//! Venue view and action tests

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use eventdesk::filters::FilterSpec;
use eventdesk::handlers::{venues, Loadable, Outcome};
use eventdesk::models::{CreateVenueRequest, Role};
use serde_json::json;

use crate::helpers::{event_json, venue_json};
use crate::integration::setup_integration_test;

#[tokio::test]
async fn test_venue_list_search() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.api
        .mock_get(
            "/api/venue",
            json!([venue_json("v1", "Blue Ballroom", "1 Main St"), venue_json("v2", "Studio 9", "Harbor Rd")]),
        )
        .await;
    let app = ctx.app_context("u1", Role::Attendee);

    let view = venues::list_venues(&app, FilterSpec::new().with_query("HARBOR")).await;
    let view = view.ready().expect("Venues should load");
    let names: Vec<_> = view.visible(&Utc::now()).iter().map(|v| v.name.clone()).collect();
    assert_eq!(names, vec!["Studio 9"]);
    assert!(!view.can_create);
}

#[tokio::test]
async fn test_venue_detail_loads_events_at_venue() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.api.mock_get("/api/venue/v1", venue_json("v1", "Blue Ballroom", "1 Main St")).await;
    ctx.api
        .mock_get_with_query(
            "/api/event",
            "venue",
            "v1",
            json!([event_json("e1", "Friday social", Utc::now() + Duration::days(2), 100, 20)]),
        )
        .await;
    let app = ctx.app_context("m1", Role::Manager);

    let view = venues::venue_detail(&app, "v1").await;
    let view = view.ready().expect("Venue should load");
    assert_eq!(view.events.len(), 1);
    assert!(view.can_manage);
    let rendered = view.render();
    assert!(rendered.contains("Friday social"));
    assert!(rendered.contains("Sound system, Wooden floor"));
}

#[tokio::test]
async fn test_venue_detail_survives_missing_events() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.api.mock_get("/api/venue/v1", venue_json("v1", "Blue Ballroom", "1 Main St")).await;
    ctx.api.mock_error("GET", "/api/event", 503, None).await;
    let app = ctx.app_context("u1", Role::Attendee);

    let view = venues::venue_detail(&app, "v1").await;
    let view = view.ready().expect("Venue should load without its events");
    assert!(view.events.is_empty());
    assert!(!view.can_manage);
}

#[tokio::test]
async fn test_missing_venue_shows_server_message() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.api.mock_error("GET", "/api/venue/nope", 404, Some("Venue not found")).await;
    ctx.api.mock_get("/api/event", json!([])).await;
    let app = ctx.app_context("u1", Role::Attendee);

    let view = venues::venue_detail(&app, "nope").await;
    assert_matches!(view, Loadable::Failed(message) if message == "Venue not found");
}

#[tokio::test]
async fn test_delete_venue_requires_capability() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.api.mock_ok("DELETE", "/api/venue/v1").await;

    let organizer = ctx.app_context("o1", Role::Organizer);
    assert_eq!(venues::delete_venue(&organizer, "v1").await.redirect(), Some("/unauthorized"));
    assert_eq!(ctx.api.count("DELETE", "/api/venue/v1").await, 0);

    let admin = ctx.app_context("a1", Role::Admin);
    let outcome = venues::delete_venue(&admin, "v1").await;
    assert!(outcome.is_success());
    assert_eq!(outcome.redirect(), Some("/venues"));
}

#[tokio::test]
async fn test_create_venue() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.api.mock_json("POST", "/api/venue", 201, json!({ "id": "v-new" })).await;
    let app = ctx.app_context("m1", Role::Manager);

    let mut request = CreateVenueRequest {
        name: "Loft".into(),
        address: "5 Mill Lane".into(),
        capacity: 80,
        description: "Top floor".into(),
        contact_info: "loft@example.com".into(),
        facilities: Vec::new(),
    };
    assert!(request.add_facility(" Bar "));
    assert!(!request.add_facility("Bar"));

    let outcome = venues::create_venue(&app, &request).await;
    assert_eq!(outcome.redirect(), Some("/venues/v-new"));

    request.address = String::new();
    assert_eq!(venues::create_venue(&app, &request).await, Outcome::Invalid("Address is required".into()));
}
