//! Feedback views and actions

use std::fmt::Write;
use chrono::{DateTime, TimeZone, Utc};
use tracing::warn;
use crate::actions::{check_feedback, settle, EventPatch, FeedbackState};
use crate::filters::{FilterSpec, TextField};
use crate::models::{Event, EventQuery, Feedback, SubmitFeedbackRequest};
use crate::services::Capability;
use crate::state::AppContext;
use crate::utils::helpers::{format_date, format_relative_time, rating_stars};
use crate::utils::logging::log_event_action;
use super::{Loadable, Notice, Outcome};

#[derive(Debug, Clone)]
pub struct FeedbackListView {
    pub events: Vec<Event>,
    pub filter: FilterSpec,
    pub can_review: bool,
}

impl FeedbackListView {
    pub fn visible<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<&Event> {
        self.filter.apply(&self.events, now)
    }

    pub fn render<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String {
        let now_utc = now.with_timezone(&Utc);
        let visible = self.visible(now);
        let mut out = String::new();

        let _ = writeln!(out, "Feedback ({} events)", visible.len());
        if self.can_review {
            let _ = writeln!(out, "  [all feedback]  /feedback/manage");
        }
        if visible.is_empty() {
            let _ = writeln!(out, "No attended events found");
        }
        for event in visible {
            let state = FeedbackState::of(event, now_utc);
            let _ = writeln!(out, "- {} | {} | {}", event.title, format_date(event.date), state.label());
            let _ = writeln!(out, "    /feedback/{}", event.id);
        }
        out
    }
}

pub async fn list_feedback(ctx: &AppContext, query: &str) -> Loadable<FeedbackListView> {
    let filter = FilterSpec::new()
        .with_query(query)
        .with_text_fields(&[TextField::Title]);

    let result = ctx.services.event_service.list(&EventQuery::attended()).await;
    Loadable::load(result, "feedback", "Failed to load your events").map(|events| FeedbackListView {
        events,
        filter,
        can_review: ctx.access.has(Capability::ViewAllFeedback),
    })
}

#[derive(Debug, Clone)]
pub struct FeedbackDetailView {
    pub event: Event,
    /// The caller's own feedback, once submitted
    pub feedback: Option<Feedback>,
}

impl FeedbackDetailView {
    pub fn state(&self, now: DateTime<Utc>) -> FeedbackState {
        if self.feedback.is_some() {
            FeedbackState::AlreadySubmitted
        } else {
            FeedbackState::of(&self.event, now)
        }
    }

    pub fn render(&self, now: DateTime<Utc>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.event.title);
        let _ = writeln!(out, "  {}", format_date(self.event.date));

        match &self.feedback {
            Some(feedback) => {
                let _ = writeln!(out, "\nYour feedback  {}", rating_stars(feedback.rating));
                let _ = writeln!(out, "  {}", feedback.comment);
                let _ = writeln!(out, "  submitted {}", format_relative_time(feedback.created_at, now));
            }
            None => {
                let state = self.state(now);
                let marker = if state.is_open() { "" } else { " (disabled)" };
                let _ = writeln!(out, "\n[{}]{}", state.label(), marker);
            }
        }
        out
    }
}

/// Existing feedback is only fetched for events flagged `has_feedback`. A
/// failed feedback fetch leaves the view usable without it.
pub async fn feedback_detail(ctx: &AppContext, event_id: &str) -> Loadable<FeedbackDetailView> {
    let event = match ctx.services.event_service.get(event_id).await {
        Ok(event) => event,
        Err(e) => return Loadable::load(Err(e), "feedback", "Failed to load feedback"),
    };

    let feedback = if event.has_feedback {
        match ctx.services.feedback_service.get(event_id).await {
            Ok(feedback) => feedback,
            Err(e) => {
                warn!(event_id = event_id, error = %e, "Could not load submitted feedback");
                None
            }
        }
    } else {
        None
    };

    Loadable::Ready(FeedbackDetailView { event, feedback })
}

/// Submit feedback for the event in `view`; patched only on success
pub async fn submit_feedback(
    ctx: &AppContext,
    view: &mut FeedbackDetailView,
    rating: u8,
    comment: &str,
    now: DateTime<Utc>,
) -> Outcome {
    let request = SubmitFeedbackRequest {
        rating,
        comment: comment.to_string(),
    };

    if let Err(e) = ctx.access.require(Capability::SubmitFeedback) {
        return Outcome::from_error(&e, "Feedback failed", "");
    }
    if view.feedback.is_some() {
        return Outcome::Invalid(FeedbackState::AlreadySubmitted.label().to_string());
    }
    if let Err(e) = check_feedback(&view.event, &request, now) {
        return Outcome::from_error(&e, "Feedback failed", "");
    }

    let Some(_ticket) = ctx.in_flight.try_acquire("feedback", &view.event.id) else {
        return Outcome::Busy;
    };

    let result = ctx.services.feedback_service.submit(&view.event.id, &request).await;
    settle(&mut view.event, EventPatch::FeedbackSubmitted, &result);

    match result {
        Ok(feedback) => {
            log_event_action(&view.event.id, "feedback", ctx.user_id(), Some(&rating.to_string()));
            view.feedback = Some(feedback);
            Outcome::done(Notice::success("Feedback submitted", "Thank you for your feedback"))
        }
        Err(e) => Outcome::from_error(&e, "Feedback failed", "Failed to submit feedback"),
    }
}
