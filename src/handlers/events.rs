//! Event views and actions

use std::fmt::Write;
use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, info};
use crate::actions::{check_registration, settle, EventPatch, RegistrationState};
use crate::filters::{distinct_values, CategoryField, FilterSpec};
use crate::models::{CreateEventRequest, Event, EventQuery};
use crate::services::Capability;
use crate::state::AppContext;
use crate::utils::errors::EventDeskError;
use crate::utils::helpers::{capitalize, format_date, truncate_text};
use crate::utils::logging::{log_event_action, log_privileged_action};
use super::{Loadable, Notice, Outcome};

#[derive(Debug, Clone)]
pub struct EventListView {
    pub events: Vec<Event>,
    pub filter: FilterSpec,
    /// Values offered by the type and location filter menus
    pub types: Vec<String>,
    pub locations: Vec<String>,
    pub can_create: bool,
}

impl EventListView {
    pub fn visible<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<&Event> {
        self.filter.apply(&self.events, now)
    }

    pub fn render<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String {
        let visible = self.visible(now);
        let mut out = String::new();

        let _ = writeln!(out, "Events ({} of {})", visible.len(), self.events.len());
        if self.can_create {
            let _ = writeln!(out, "  [create event]  /events/create");
        }
        if !self.types.is_empty() {
            let _ = writeln!(out, "  types: {}", self.types.join(", "));
        }
        if !self.locations.is_empty() {
            let _ = writeln!(out, "  locations: {}", self.locations.join(", "));
        }

        if visible.is_empty() {
            let _ = writeln!(out, "No events found");
        }
        for event in visible {
            let _ = writeln!(
                out,
                "- {} | {} {} | {} | {} | {}/{}",
                event.title,
                format_date(event.date),
                event.time,
                event.location,
                capitalize(&event.event_type),
                event.attendee_count,
                event.capacity,
            );
            if !event.description.is_empty() {
                let _ = writeln!(out, "    {}", truncate_text(&event.description, 80));
            }
            let _ = writeln!(out, "    /events/{}", event.id);
        }
        out
    }
}

pub async fn list_events(ctx: &AppContext, filter: FilterSpec) -> Loadable<EventListView> {
    debug!(user_id = ctx.user_id(), "Loading event list");

    let result = ctx.services.event_service.list(&EventQuery::default()).await;
    Loadable::load(result, "events", "Failed to load events").map(|events| EventListView {
        types: distinct_values(&events, CategoryField::Type),
        locations: distinct_values(&events, CategoryField::Location),
        can_create: ctx.access.has(Capability::CreateEvent),
        events,
        filter,
    })
}

#[derive(Debug, Clone)]
pub struct EventDetailView {
    pub event: Event,
    pub can_manage: bool,
    pub can_register: bool,
}

impl EventDetailView {
    pub fn registration(&self, now: DateTime<Utc>) -> RegistrationState {
        RegistrationState::of(&self.event, now)
    }

    pub fn render(&self, now: DateTime<Utc>) -> String {
        let event = &self.event;
        let mut out = String::new();

        let _ = writeln!(out, "{}", event.title);
        let _ = writeln!(out, "  {} {}", format_date(event.date), event.time);
        let _ = writeln!(out, "  {}", event.location);
        let _ = writeln!(out, "  {}", capitalize(&event.event_type));
        if let Some(organizer) = event.organizer_name() {
            let _ = writeln!(out, "  Organized by {}", organizer);
        }
        let _ = writeln!(
            out,
            "  {} of {} seats taken, {} left",
            event.attendee_count,
            event.capacity,
            event.seats_left()
        );
        if !event.description.is_empty() {
            let _ = writeln!(out, "\n{}", event.description);
        }

        let _ = writeln!(out);
        if self.can_register {
            let state = self.registration(now);
            let marker = if state.is_open() { "" } else { " (disabled)" };
            let _ = writeln!(out, "[{}]{}", state.label(), marker);
        }
        if self.can_manage {
            let _ = writeln!(out, "[edit]  /events/{}/edit", event.id);
            let _ = writeln!(out, "[delete]");
        }
        out
    }
}

pub async fn event_detail(ctx: &AppContext, event_id: &str) -> Loadable<EventDetailView> {
    let result = ctx.services.event_service.get(event_id).await;
    Loadable::load(result, "event", "Failed to load event").map(|event| EventDetailView {
        can_manage: ctx.access.can_manage_event(&event),
        can_register: ctx.access.has(Capability::RegisterForEvent),
        event,
    })
}

/// Register for the event shown in `view`. The view is patched only on success.
pub async fn register(ctx: &AppContext, view: &mut EventDetailView, now: DateTime<Utc>) -> Outcome {
    if let Err(e) = ctx.access.require(Capability::RegisterForEvent) {
        return Outcome::from_error(&e, "Registration failed", "");
    }
    if let Err(e) = check_registration(&view.event, now) {
        return Outcome::from_error(&e, "Registration failed", "");
    }

    let Some(_ticket) = ctx.in_flight.try_acquire("register", &view.event.id) else {
        return Outcome::Busy;
    };

    let result = ctx.services.event_service.register(&view.event.id).await;
    settle(&mut view.event, EventPatch::Registered, &result);

    match result {
        Ok(()) => {
            log_event_action(&view.event.id, "register", ctx.user_id(), None);
            Outcome::done(Notice::success(
                "Registration successful",
                format!("You have been registered for {}", view.event.title),
            ))
        }
        Err(e) => Outcome::from_error(&e, "Registration failed", "Failed to register for this event"),
    }
}

pub async fn delete_event(ctx: &AppContext, event_id: &str) -> Outcome {
    let event = match ctx.services.event_service.get(event_id).await {
        Ok(event) => event,
        Err(e) => return Outcome::from_error(&e, "Delete failed", "Failed to load event"),
    };

    if !ctx.access.can_delete_event(&event) {
        let denied = EventDeskError::PermissionDenied(format!("cannot delete event {}", event.id));
        return Outcome::from_error(&denied, "Delete failed", "");
    }

    let Some(_ticket) = ctx.in_flight.try_acquire("delete-event", &event.id) else {
        return Outcome::Busy;
    };

    match ctx.services.event_service.delete(&event.id).await {
        Ok(()) => {
            log_privileged_action(ctx.user_id(), ctx.access.role().as_str(), "delete-event", Some(&event.id));
            Outcome::done_and_go(
                Notice::success("Event deleted", format!("{} has been deleted", event.title)),
                "/events",
            )
        }
        Err(e) => Outcome::from_error(&e, "Delete failed", "Failed to delete event"),
    }
}

pub async fn create_event(ctx: &AppContext, request: &CreateEventRequest) -> Outcome {
    if let Err(e) = ctx.access.require(Capability::CreateEvent) {
        return Outcome::from_error(&e, "Create failed", "");
    }
    if let Err(message) = request.validate() {
        return Outcome::Invalid(message);
    }

    let Some(_ticket) = ctx.in_flight.try_acquire("create-event", &request.title) else {
        return Outcome::Busy;
    };

    match ctx.services.event_service.create(request).await {
        Ok(created) => {
            info!(event_id = %created.id, user_id = ctx.user_id(), "Event created from dashboard");
            Outcome::done_and_go(
                Notice::success("Event created", format!("{} has been created", request.title)),
                format!("/events/{}", created.id),
            )
        }
        Err(e) => Outcome::from_error(&e, "Create failed", "Failed to create event"),
    }
}
