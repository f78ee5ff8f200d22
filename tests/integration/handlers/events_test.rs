//! Event view and action tests

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use eventdesk::filters::{CategoryField, DateBucket, FilterSpec};
use eventdesk::handlers::{events, Loadable, NoticeVariant, Outcome};
use eventdesk::models::{CreateEventRequest, Role};
use serde_json::json;

use crate::fixtures::event_catalogue;
use crate::helpers::event_json;
use crate::integration::setup_integration_test;

#[tokio::test]
async fn test_event_list_filters_locally() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.api.mock_get("/api/event", event_catalogue()).await;
    let app = ctx.app_context("u1", Role::Attendee);

    let view = events::list_events(&app, FilterSpec::new().with_query("conf")).await;
    let view = view.ready().expect("Event list should load");
    let now = Utc::now();

    let titles: Vec<_> = view.visible(&now).iter().map(|e| e.title.clone()).collect();
    assert_eq!(titles, vec!["Conference A"]);
    assert_eq!(view.events.len(), 4);
    assert_eq!(view.types, vec!["social"]);
    assert!(!view.can_create);
}

#[tokio::test]
async fn test_event_list_buckets() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.api.mock_get("/api/event", event_catalogue()).await;
    let app = ctx.app_context("u1", Role::Manager);

    let filter = FilterSpec::new()
        .with_bucket(DateBucket::ThisWeek)
        .with_category(CategoryField::Location, "Main Hall");
    let loaded = events::list_events(&app, filter).await;
    let view = loaded.ready().expect("Event list should load");

    let ids: Vec<_> = view.visible(&Utc::now()).iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec!["e-upcoming"]);
    assert!(view.can_create);
    assert!(view.render(&Utc::now()).contains("[create event]"));
}

#[tokio::test]
async fn test_event_list_failure_shows_error_state() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.api.mock_error("GET", "/api/event", 500, None).await;
    let app = ctx.app_context("u1", Role::Attendee);

    let view = events::list_events(&app, FilterSpec::new()).await;
    assert_matches!(view, Loadable::Failed(message) if message == "Failed to load events");
}

#[tokio::test]
async fn test_register_patches_on_success() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    let date = Utc::now() + Duration::days(5);
    ctx.api.mock_get("/api/event/e1", event_json("e1", "Social", date, 10, 4)).await;
    ctx.api.mock_ok("POST", "/api/event/e1/register").await;
    let app = ctx.app_context("u1", Role::Attendee);

    let mut view = events::event_detail(&app, "e1").await.ready().cloned().expect("Event should load");
    let outcome = events::register(&app, &mut view, Utc::now()).await;

    assert!(outcome.is_success());
    assert!(view.event.is_registered);
    assert_eq!(view.event.attendee_count, 5);
    assert_eq!(view.registration(Utc::now()).label(), "you are registered for this event");
    assert_eq!(ctx.api.count("POST", "/api/event/e1/register").await, 1);
}

#[tokio::test]
async fn test_register_failure_leaves_event_untouched() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    let date = Utc::now() + Duration::days(5);
    ctx.api.mock_get("/api/event/e1", event_json("e1", "Social", date, 10, 4)).await;
    ctx.api.mock_error("POST", "/api/event/e1/register", 409, Some("Registration closed")).await;
    let app = ctx.app_context("u1", Role::Attendee);

    let mut view = events::event_detail(&app, "e1").await.ready().cloned().expect("Event should load");
    let before = view.event.clone();
    let outcome = events::register(&app, &mut view, Utc::now()).await;

    assert_matches!(
        outcome,
        Outcome::Failed(notice) if notice.description == "Registration closed" && notice.variant == NoticeVariant::Error
    );
    assert_eq!(view.event, before);
}

#[tokio::test]
async fn test_register_failure_without_message_uses_fallback() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    let date = Utc::now() + Duration::days(5);
    ctx.api.mock_get("/api/event/e1", event_json("e1", "Social", date, 10, 4)).await;
    ctx.api.mock_error("POST", "/api/event/e1/register", 500, None).await;
    let app = ctx.app_context("u1", Role::Attendee);

    let mut view = events::event_detail(&app, "e1").await.ready().cloned().expect("Event should load");
    let outcome = events::register(&app, &mut view, Utc::now()).await;

    assert_matches!(outcome, Outcome::Failed(notice) if notice.description == "Failed to register for this event");
    assert!(!view.event.is_registered);
}

#[tokio::test]
async fn test_full_event_is_refused_before_request() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    let date = Utc::now() - Duration::days(1);
    ctx.api.mock_get("/api/event/e1", event_json("e1", "Social", date, 10, 10)).await;
    ctx.api.mock_ok("POST", "/api/event/e1/register").await;
    let app = ctx.app_context("u1", Role::Attendee);

    let mut view = events::event_detail(&app, "e1").await.ready().cloned().expect("Event should load");
    let outcome = events::register(&app, &mut view, Utc::now()).await;

    assert_eq!(outcome, Outcome::Invalid("event has reached capacity".to_string()));
    assert!(view.render(Utc::now()).contains("[event has reached capacity] (disabled)"));
    assert_eq!(ctx.api.count("POST", "/api/event/e1/register").await, 0);
}

#[tokio::test]
async fn test_register_refused_while_in_flight() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    let date = Utc::now() + Duration::days(5);
    ctx.api.mock_get("/api/event/e1", event_json("e1", "Social", date, 10, 4)).await;
    let app = ctx.app_context("u1", Role::Attendee);

    let mut view = events::event_detail(&app, "e1").await.ready().cloned().expect("Event should load");
    let _pending = app.in_flight.try_acquire("register", "e1").expect("Nothing should be in flight");

    assert_eq!(events::register(&app, &mut view, Utc::now()).await, Outcome::Busy);
    assert_eq!(ctx.api.count("POST", "/api/event/e1/register").await, 0);
}

#[tokio::test]
async fn test_organizer_manages_only_own_events() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    let date = Utc::now() + Duration::days(5);
    ctx.api.mock_get("/api/event/e1", event_json("e1", "Social", date, 10, 4)).await;
    ctx.api.mock_ok("DELETE", "/api/event/e1").await;

    let other = ctx.app_context("organizer-2", Role::Organizer);
    let view = events::event_detail(&other, "e1").await;
    assert!(!view.ready().expect("Event should load").can_manage);
    assert_eq!(events::delete_event(&other, "e1").await.redirect(), Some("/unauthorized"));
    assert_eq!(ctx.api.count("DELETE", "/api/event/e1").await, 0);

    let owner = ctx.app_context("organizer-1", Role::Organizer);
    let outcome = events::delete_event(&owner, "e1").await;
    assert!(outcome.is_success());
    assert_eq!(outcome.redirect(), Some("/events"));
}

#[tokio::test]
async fn test_delete_event_follows_delete_capability() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    let date = Utc::now() + Duration::days(5);
    ctx.api.mock_get("/api/event/e1", event_json("e1", "Social", date, 10, 4)).await;
    ctx.api.mock_ok("DELETE", "/api/event/e1").await;

    let attendee = ctx.app_context("organizer-1", Role::Attendee);
    assert_eq!(events::delete_event(&attendee, "e1").await.redirect(), Some("/unauthorized"));
    assert_eq!(ctx.api.count("DELETE", "/api/event/e1").await, 0);

    let manager = ctx.app_context("manager-1", Role::Manager);
    let outcome = events::delete_event(&manager, "e1").await;
    assert!(outcome.is_success());
    assert_eq!(ctx.api.count("DELETE", "/api/event/e1").await, 1);
}

#[tokio::test]
async fn test_create_event_validates_then_posts() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    ctx.api.mock_json("POST", "/api/event", 201, json!({ "id": "new-1" })).await;
    let app = ctx.app_context("organizer-1", Role::Organizer);

    let mut request = CreateEventRequest {
        title: "Blues night".into(),
        description: "Slow dancing".into(),
        date: (Utc::now() + Duration::days(14)).date_naive(),
        time: "8:00 PM".into(),
        location: "Cellar".into(),
        event_type: "social".into(),
        capacity: 0,
    };
    assert_eq!(
        events::create_event(&app, &request).await,
        Outcome::Invalid("Capacity must be at least 1".into())
    );
    assert_eq!(ctx.api.count("POST", "/api/event").await, 0);

    request.capacity = 40;
    let outcome = events::create_event(&app, &request).await;
    assert_eq!(outcome.redirect(), Some("/events/new-1"));

    let attendee = ctx.app_context("u9", Role::Attendee);
    assert_eq!(events::create_event(&attendee, &request).await.redirect(), Some("/unauthorized"));
}
