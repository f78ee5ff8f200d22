//! Attendance views and actions
//!
//! Attendees see the events they registered for and mark attendance with
//! the one-time code handed out at the event.

use std::fmt::Write;
use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;
use crate::actions::{check_attendance, settle, AttendanceState, EventPatch};
use crate::filters::{FilterSpec, TextField};
use crate::models::{Event, EventQuery, MarkAttendanceRequest};
use crate::services::Capability;
use crate::state::AppContext;
use crate::utils::helpers::format_date;
use crate::utils::logging::log_event_action;
use super::{Loadable, Notice, Outcome};

#[derive(Debug, Clone)]
pub struct AttendanceListView {
    pub events: Vec<Event>,
    pub filter: FilterSpec,
    pub can_manage: bool,
}

impl AttendanceListView {
    pub fn visible<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<&Event> {
        self.filter.apply(&self.events, now)
    }

    pub fn render<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String {
        let now_utc = now.with_timezone(&Utc);
        let visible = self.visible(now);
        let mut out = String::new();

        let _ = writeln!(out, "My attendance ({} events)", visible.len());
        if self.can_manage {
            let _ = writeln!(out, "  [manage attendance]  /attendance/manage");
        }
        if visible.is_empty() {
            let _ = writeln!(out, "No registered events found");
        }
        for event in visible {
            let state = AttendanceState::of(event, now_utc);
            let _ = writeln!(out, "- {} | {} | {}", event.title, format_date(event.date), state.label());
            if state.is_open() {
                let _ = writeln!(out, "    /attendance/{}", event.id);
            }
        }
        out
    }
}

pub async fn list_attendance(ctx: &AppContext, query: &str) -> Loadable<AttendanceListView> {
    let filter = FilterSpec::new()
        .with_query(query)
        .with_text_fields(&[TextField::Title]);

    let result = ctx.services.event_service.list(&EventQuery::registered()).await;
    Loadable::load(result, "attendance", "Failed to load your events").map(|events| AttendanceListView {
        events,
        filter,
        can_manage: ctx.access.has(Capability::ManageAttendance),
    })
}

/// Mark attendance on `event` with `code`. The event is patched only on success.
pub async fn mark_attendance(ctx: &AppContext, event: &mut Event, code: &str, now: DateTime<Utc>) -> Outcome {
    let request = MarkAttendanceRequest { code: code.trim().to_string() };

    if let Err(e) = ctx.access.require(Capability::MarkAttendance) {
        return Outcome::from_error(&e, "Attendance failed", "");
    }
    if let Err(e) = check_attendance(event, &request, now) {
        return Outcome::from_error(&e, "Attendance failed", "");
    }

    let Some(_ticket) = ctx.in_flight.try_acquire("attendance", &event.id) else {
        return Outcome::Busy;
    };

    debug!(event_id = %event.id, user_id = ctx.user_id(), "Submitting attendance code");
    let result = ctx.services.attendance_service.mark(&event.id, &request).await;
    settle(event, EventPatch::Attended, &result);

    match result {
        Ok(()) => {
            log_event_action(&event.id, "attendance", ctx.user_id(), None);
            Outcome::done(Notice::success("Attendance marked", format!("Thanks for attending {}", event.title)))
        }
        Err(e) => Outcome::from_error(&e, "Attendance failed", "Failed to mark attendance"),
    }
}
