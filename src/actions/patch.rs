//! Local patches applied after a mutation succeeds

use tracing::debug;
use crate::models::Event;
use crate::utils::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPatch {
    /// `isRegistered = true`, one more attendee
    Registered,
    Attended,
    FeedbackSubmitted,
}

impl EventPatch {
    pub fn apply(&self, event: &mut Event) {
        match self {
            EventPatch::Registered => {
                if !event.is_registered {
                    event.is_registered = true;
                    event.attendee_count = event.attendee_count.saturating_add(1);
                }
            }
            EventPatch::Attended => event.has_attended = true,
            EventPatch::FeedbackSubmitted => event.has_feedback = true,
        }
        debug!(event_id = %event.id, patch = ?self, "Local event patched");
    }
}

/// Apply `patch` only if the request succeeded. Returns whether it was applied.
pub fn settle<T>(event: &mut Event, patch: EventPatch, outcome: &Result<T>) -> bool {
    if outcome.is_ok() {
        patch.apply(event);
        true
    } else {
        false
    }
}
