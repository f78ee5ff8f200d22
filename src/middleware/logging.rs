//! Request logging middleware
//!
//! Wraps every outbound API call with timing and outcome logging.

use std::time::Instant;
use reqwest::Method;
use tracing::{debug, instrument};
use crate::utils::logging::{log_api_error, log_request};

#[derive(Debug, Clone)]
pub struct RequestLogger {
    enabled: bool,
}

impl RequestLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Mark the start of a request
    #[instrument(skip(self), level = "trace")]
    pub fn start(&self, method: &Method, path: &str, request_id: &str) -> RequestTimer {
        if self.enabled {
            debug!(method = %method, path = path, request_id = request_id, "API request started");
        }
        RequestTimer {
            enabled: self.enabled,
            method: method.to_string(),
            path: path.to_string(),
            started: Instant::now(),
        }
    }
}

/// Measures one request; consumed by one of the finish methods
#[derive(Debug)]
pub struct RequestTimer {
    enabled: bool,
    method: String,
    path: String,
    started: Instant,
}

impl RequestTimer {
    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// The server answered
    pub fn finish(self, status: u16) {
        if self.enabled {
            let success = (200..300).contains(&status);
            log_request(&self.method, &self.path, Some(status), self.elapsed_ms(), success);
        }
    }

    /// The request never got an answer
    pub fn fail(self, error: &str) {
        if self.enabled {
            log_request(&self.method, &self.path, None, self.elapsed_ms(), false);
            log_api_error(&self.path, error, Some(&self.method));
        }
    }
}
