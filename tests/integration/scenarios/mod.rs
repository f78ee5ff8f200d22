//! Integration test scenarios
//!
//! Journeys that cross the session, the routing gate and several views.

pub mod attendee_journey_test;
pub mod navigation_test;
