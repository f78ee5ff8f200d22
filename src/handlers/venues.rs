//! Venue views and actions

use std::fmt::Write;
use chrono::{DateTime, TimeZone};
use futures::future::join;
use tracing::{debug, warn};
use crate::filters::FilterSpec;
use crate::models::{CreateVenueRequest, Event, EventQuery, Venue};
use crate::services::Capability;
use crate::state::AppContext;
use crate::utils::helpers::{format_date, truncate_text};
use crate::utils::logging::log_privileged_action;
use super::{Loadable, Notice, Outcome};

#[derive(Debug, Clone)]
pub struct VenueListView {
    pub venues: Vec<Venue>,
    pub filter: FilterSpec,
    pub can_create: bool,
}

impl VenueListView {
    pub fn visible<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<&Venue> {
        self.filter.apply(&self.venues, now)
    }

    pub fn render<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String {
        let visible = self.visible(now);
        let mut out = String::new();

        let _ = writeln!(out, "Venues ({} of {})", visible.len(), self.venues.len());
        if self.can_create {
            let _ = writeln!(out, "  [add venue]  /venues/create");
        }
        if visible.is_empty() {
            let _ = writeln!(out, "No venues found");
        }
        for venue in visible {
            let _ = writeln!(out, "- {} | {} | capacity {}", venue.name, venue.address, venue.capacity);
            if !venue.facilities.is_empty() {
                let _ = writeln!(out, "    {}", truncate_text(&venue.facilities.join(", "), 80));
            }
            let _ = writeln!(out, "    /venues/{}", venue.id);
        }
        out
    }
}

pub async fn list_venues(ctx: &AppContext, filter: FilterSpec) -> Loadable<VenueListView> {
    let result = ctx.services.venue_service.list().await;
    Loadable::load(result, "venues", "Failed to load venues").map(|venues| VenueListView {
        venues,
        filter,
        can_create: ctx.access.has(Capability::CreateVenue),
    })
}

#[derive(Debug, Clone)]
pub struct VenueDetailView {
    pub venue: Venue,
    /// Events held at the venue; empty when they could not be loaded
    pub events: Vec<Event>,
    pub can_manage: bool,
}

impl VenueDetailView {
    pub fn render(&self) -> String {
        let venue = &self.venue;
        let mut out = String::new();

        let _ = writeln!(out, "{}", venue.name);
        let _ = writeln!(out, "  {}", venue.address);
        let _ = writeln!(out, "  Capacity {}", venue.capacity);
        if !venue.contact_info.is_empty() {
            let _ = writeln!(out, "  Contact: {}", venue.contact_info);
        }
        if !venue.facilities.is_empty() {
            let _ = writeln!(out, "  Facilities: {}", venue.facilities.join(", "));
        }
        if !venue.description.is_empty() {
            let _ = writeln!(out, "\n{}", venue.description);
        }

        let _ = writeln!(out, "\nEvents at this venue");
        if self.events.is_empty() {
            let _ = writeln!(out, "  none scheduled");
        }
        for event in &self.events {
            let _ = writeln!(out, "- {} | {}  /events/{}", event.title, format_date(event.date), event.id);
        }

        if self.can_manage {
            let _ = writeln!(out, "\n[edit]  /venues/{}/edit", venue.id);
            let _ = writeln!(out, "[delete]");
        }
        out
    }
}

/// Venue and its events are fetched concurrently; only the venue is required
pub async fn venue_detail(ctx: &AppContext, venue_id: &str) -> Loadable<VenueDetailView> {
    let (venue, events) = join(
        ctx.services.venue_service.get(venue_id),
        ctx.services.event_service.list(&EventQuery::at_venue(venue_id)),
    )
    .await;

    let events = events.unwrap_or_else(|e| {
        warn!(venue_id = venue_id, error = %e, "Failed to load events for venue");
        Vec::new()
    });
    debug!(venue_id = venue_id, events = events.len(), "Venue detail loaded");

    Loadable::load(venue, "venue", "Failed to load venue").map(|venue| VenueDetailView {
        venue,
        events,
        can_manage: ctx.access.can_manage_venues(),
    })
}

pub async fn delete_venue(ctx: &AppContext, venue_id: &str) -> Outcome {
    if let Err(e) = ctx.access.require(Capability::DeleteVenue) {
        return Outcome::from_error(&e, "Delete failed", "");
    }

    let Some(_ticket) = ctx.in_flight.try_acquire("delete-venue", venue_id) else {
        return Outcome::Busy;
    };

    match ctx.services.venue_service.delete(venue_id).await {
        Ok(()) => {
            log_privileged_action(ctx.user_id(), ctx.access.role().as_str(), "delete-venue", Some(venue_id));
            Outcome::done_and_go(Notice::success("Venue deleted", "The venue has been deleted"), "/venues")
        }
        Err(e) => Outcome::from_error(&e, "Delete failed", "Failed to delete venue"),
    }
}

pub async fn create_venue(ctx: &AppContext, request: &CreateVenueRequest) -> Outcome {
    if let Err(e) = ctx.access.require(Capability::CreateVenue) {
        return Outcome::from_error(&e, "Create failed", "");
    }
    if let Err(message) = request.validate() {
        return Outcome::Invalid(message);
    }

    let Some(_ticket) = ctx.in_flight.try_acquire("create-venue", &request.name) else {
        return Outcome::Busy;
    };

    match ctx.services.venue_service.create(request).await {
        Ok(created) => Outcome::done_and_go(
            Notice::success("Venue created", format!("{} has been added", request.name)),
            format!("/venues/{}", created.id),
        ),
        Err(e) => Outcome::from_error(&e, "Create failed", "Failed to create venue"),
    }
}
