//! Test helpers module
//!
//! This module provides utilities and helpers for testing EventDesk.
//! It includes the mock dashboard API, credential builders and test context setup.

pub mod api_mock;
pub mod test_context;
pub mod test_data;

pub use api_mock::*;
pub use test_context::*;
pub use test_data::*;
