//! Attendee journey: register, attend, give feedback

use chrono::{Duration, Utc};
use eventdesk::actions::{AttendanceState, FeedbackState, RegistrationState};
use eventdesk::handlers::{attendance, events, feedback, Outcome};
use eventdesk::models::Role;

use crate::helpers::{event_json, feedback_json};
use crate::integration::setup_integration_test;

#[tokio::test]
async fn test_attendee_journey() {
    let ctx = setup_integration_test().await.expect("Failed to setup integration test");
    let event_date = Utc::now() + Duration::days(2);
    ctx.api.mock_get("/api/event/e1", event_json("e1", "Harbor social", event_date, 30, 12)).await;
    ctx.api.mock_ok("POST", "/api/event/e1/register").await;
    ctx.api.mock_ok("POST", "/api/attendance/e1").await;
    ctx.api.mock_error("GET", "/api/feedback/e1", 404, None).await;
    ctx.api
        .mock_json("POST", "/api/feedback/e1", 201, feedback_json("f1", "e1", 4, "Lovely evening"))
        .await;
    let app = ctx.app_context("u1", Role::Attendee);

    // before the event: register, attendance and feedback closed
    let mut view = events::event_detail(&app, "e1").await.ready().cloned().expect("Event should load");
    let now = Utc::now();
    assert_eq!(view.registration(now), RegistrationState::Open);
    assert!(events::register(&app, &mut view, now).await.is_success());
    assert_eq!(view.event.attendee_count, 13);

    let early = attendance::mark_attendance(&app, &mut view.event, "CODE", now).await;
    assert_eq!(early, Outcome::Invalid(AttendanceState::NotYetHeld.label().into()));

    // three days later
    let later = now + Duration::days(3);
    assert_eq!(view.registration(later), RegistrationState::AlreadyRegistered);
    assert!(attendance::mark_attendance(&app, &mut view.event, "CODE", later).await.is_success());
    assert_eq!(AttendanceState::of(&view.event, later), AttendanceState::AlreadyMarked);

    let mut feedback_view = feedback::feedback_detail(&app, "e1").await.ready().cloned().expect("Feedback view should load");
    feedback_view.event = view.event.clone();
    assert_eq!(feedback_view.state(later), FeedbackState::Open);

    let outcome = feedback::submit_feedback(&app, &mut feedback_view, 4, "Lovely evening", later).await;
    assert!(outcome.is_success());
    assert_eq!(feedback_view.state(later), FeedbackState::AlreadySubmitted);
}
