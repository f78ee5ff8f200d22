//! In-flight submission guard
//!
//! A control is refused while the same action on the same entity is still
//! waiting for the server. This is a soft, client-side exclusion only: other
//! processes can still race and the server decides on duplicates.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct InFlightGuard {
    active: Arc<Mutex<HashSet<String>>>,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claim `action` on `entity_id`. `None` when a submission is already
    /// in flight; the claim is released when the ticket is dropped.
    pub fn try_acquire(&self, action: &str, entity_id: &str) -> Option<InFlightTicket> {
        let key = format!("{}:{}", action, entity_id);
        let mut active = self.lock();

        if !active.insert(key.clone()) {
            warn!(key = %key, "Submission already in flight");
            return None;
        }

        debug!(key = %key, "Submission started");
        Some(InFlightTicket {
            key,
            active: Arc::clone(&self.active),
        })
    }

    pub fn is_in_flight(&self, action: &str, entity_id: &str) -> bool {
        self.lock().contains(&format!("{}:{}", action, entity_id))
    }

    pub fn active_count(&self) -> usize {
        self.lock().len()
    }
}

/// Releases its claim on drop
#[derive(Debug)]
pub struct InFlightTicket {
    key: String,
    active: Arc<Mutex<HashSet<String>>>,
}

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        let mut active = self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        active.remove(&self.key);
        debug!(key = %self.key, "Submission finished");
    }
}
