//! Dashboard API client
//!
//! Thin JSON-over-HTTP client for the dashboard REST API. Every request
//! carries the session's bearer credential and a fresh request id. Non-2xx
//! answers are turned into [`ApiError::Server`] with the `message` the
//! server put in the body, when there is one.

use std::time::Duration;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;
use crate::config::Settings;
use crate::middleware::RequestLogger;
use crate::utils::errors::{ApiError, EventDeskError, Result};
use crate::utils::helpers::generate_request_id;

/// Error body shape used by the API
#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    credential: String,
    logger: RequestLogger,
}

impl ApiClient {
    /// Create a client that authenticates with `credential`
    pub fn new(settings: &Settings, credential: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.api.timeout_seconds))
            .user_agent(settings.api.user_agent.as_str())
            .build()
            .map_err(EventDeskError::Http)?;

        let mut base_url = Url::parse(&settings.api.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            credential: credential.to_string(),
            logger: RequestLogger::new(settings.features.request_logging),
        })
    }

    /// Build an endpoint URL from path segments; segments are escaped.
    /// Empty, `.` and `..` segments are refused since they would change
    /// which resource the URL names.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(segment) = segments.iter().find(|s| matches!(s.trim(), "" | "." | "..")) {
            return Err(EventDeskError::Validation(format!("Invalid identifier: {:?}", segment)));
        }

        let relative = segments
            .iter()
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        Ok(self.base_url.join(&relative)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let response = self.send(Method::GET, segments, |request| request).await?;
        Self::read_json(response).await
    }

    pub async fn get_with_query<T, Q>(&self, segments: &[&str], query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.send(Method::GET, segments, |request| request.query(query)).await?;
        Self::read_json(response).await
    }

    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, segments, |request| request.json(body)).await?;
        Self::read_json(response).await
    }

    /// POST where only success matters; the response body is ignored
    pub async fn post_for_status<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> Result<()> {
        self.send(Method::POST, segments, |request| request.json(body)).await?;
        Ok(())
    }

    pub async fn put<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::PUT, segments, |request| request.json(body)).await?;
        Self::read_json(response).await
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<()> {
        self.send(Method::DELETE, segments, |request| request).await?;
        Ok(())
    }

    async fn send<F>(&self, method: Method, segments: &[&str], build: F) -> Result<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.endpoint(segments)?;
        let request_id = generate_request_id();
        let timer = self.logger.start(&method, url.path(), &request_id);

        let request = self
            .client
            .request(method, url.clone())
            .bearer_auth(&self.credential)
            .header("X-Request-Id", &request_id);

        let response = match build(request).send().await {
            Ok(response) => response,
            Err(e) => {
                timer.fail(&e.to_string());
                return Err(Self::transport_error(e));
            }
        };

        let status = response.status();
        timer.finish(status.as_u16());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());

        warn!(url = %url, status = status.as_u16(), message = ?message, "API returned an error");

        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        }
        .into())
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let url = response.url().clone();
        let body = response.bytes().await.map_err(Self::transport_error)?;
        serde_json::from_slice(&body).map_err(|e| {
            debug!(url = %url, error = %e, "Response body did not match the expected shape");
            ApiError::InvalidResponse(e.to_string()).into()
        })
    }

    fn transport_error(e: reqwest::Error) -> EventDeskError {
        if e.is_timeout() {
            ApiError::Timeout.into()
        } else if e.is_connect() {
            ApiError::Unreachable(e.to_string()).into()
        } else {
            EventDeskError::Http(e)
        }
    }
}
