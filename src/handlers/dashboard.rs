//! Dashboard view

use std::fmt::Write;
use chrono::{DateTime, Utc};
use futures::future::join;
use tracing::warn;
use crate::models::{Event, EventQuery, Identity};
use crate::services::Capability;
use crate::state::AppContext;
use crate::utils::helpers::{capitalize, format_date};
use super::Loadable;

/// Number of upcoming events shown on the dashboard
pub const UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct DashboardView {
    pub identity: Identity,
    pub upcoming: Vec<Event>,
    pub registered_count: usize,
    pub can_create_event: bool,
    pub can_manage_venues: bool,
    pub can_access_admin: bool,
}

impl DashboardView {
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Welcome back, {} ({})", self.identity.name, capitalize(self.identity.role.as_str()));
        let _ = writeln!(out, "You are registered for {} events", self.registered_count);

        let _ = writeln!(out, "\nUpcoming events");
        if self.upcoming.is_empty() {
            let _ = writeln!(out, "  nothing scheduled");
        }
        for event in &self.upcoming {
            let _ = writeln!(out, "- {} | {} | {}  /events/{}", event.title, format_date(event.date), event.location, event.id);
        }

        let mut shortcuts = Vec::new();
        if self.can_create_event {
            shortcuts.push("/events/create");
        }
        if self.can_manage_venues {
            shortcuts.push("/venues/create");
        }
        if self.can_access_admin {
            shortcuts.push("/admin");
        }
        if !shortcuts.is_empty() {
            let _ = writeln!(out, "\nShortcuts: {}", shortcuts.join("  "));
        }
        out
    }
}

/// Earliest events at or after `now`, at most [`UPCOMING_LIMIT`]
pub fn upcoming(mut events: Vec<Event>, now: DateTime<Utc>) -> Vec<Event> {
    events.retain(|event| event.date >= now);
    events.sort_by_key(|event| event.date);
    events.truncate(UPCOMING_LIMIT);
    events
}

pub async fn dashboard(ctx: &AppContext, now: DateTime<Utc>) -> Loadable<DashboardView> {
    let events = &ctx.services.event_service;
    let (all, registered) = join(events.list(&EventQuery::default()), events.list(&EventQuery::registered())).await;

    let registered_count = match registered {
        Ok(registered) => registered.len(),
        Err(e) => {
            warn!(error = %e, "Failed to load registered events");
            0
        }
    };

    Loadable::load(all, "dashboard", "Failed to load dashboard").map(|all| DashboardView {
        identity: ctx.identity().clone(),
        upcoming: upcoming(all, now),
        registered_count,
        can_create_event: ctx.access.has(Capability::CreateEvent),
        can_manage_venues: ctx.access.can_manage_venues(),
        can_access_admin: ctx.access.has(Capability::AccessAdminPanel),
    })
}
