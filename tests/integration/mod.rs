//! Integration tests module
//!
//! This module contains all integration tests for EventDesk, organized by
//! view handler and by end-to-end scenario.

pub mod handlers;
pub mod scenarios;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Common setup function for integration tests
pub async fn setup_integration_test() -> Result<crate::helpers::TestContext, Box<dyn std::error::Error + Send + Sync>> {
    init_test_logging();
    crate::helpers::TestContext::new().await
}
