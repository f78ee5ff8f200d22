//! Mock dashboard API server for testing
//!
//! This module provides a mock HTTP server that simulates the dashboard REST
//! API. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{header_exists, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Mock dashboard API server
pub struct ApiMockServer {
    pub server: MockServer,
}

impl ApiMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Answer `verb path` with `status` and a JSON body
    pub async fn mock_json(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(route))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer a GET carrying `key=value` in its query. Takes precedence over
    /// a plain GET on the same path.
    pub async fn mock_get_with_query(&self, route: &str, key: &str, value: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param(key, value))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_get(&self, route: &str, body: Value) {
        self.mock_json("GET", route, 200, body).await;
    }

    /// Successful mutation with an empty JSON object as body
    pub async fn mock_ok(&self, verb: &str, route: &str) {
        self.mock_json(verb, route, 200, json!({})).await;
    }

    /// Failure with `{message}` when given, otherwise an empty body
    pub async fn mock_error(&self, verb: &str, route: &str, status: u16, message: Option<&str>) {
        let response = match message {
            Some(message) => ResponseTemplate::new(status).set_body_json(json!({ "message": message })),
            None => ResponseTemplate::new(status),
        };
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Requests received so far for `verb path`
    pub async fn count(&self, verb: &str, route: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.method.as_str() == verb && request.url.path() == route)
            .count()
    }

    /// JSON bodies received so far for `verb path`, in arrival order
    pub async fn received_json(&self, verb: &str, route: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.method.as_str() == verb && request.url.path() == route)
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }

    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
