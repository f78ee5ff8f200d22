//! Integration tests for view handlers against the mock API

pub mod events_test;
pub mod profile_test;
pub mod venues_test;
