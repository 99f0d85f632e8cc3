//! HTTP client for the endpoint serve API.
//!
//! # Responsibilities
//! - Issue terminate and execute requests against an endpoint
//! - Fold every failure mode (transport error, non-2xx) into a boolean
//! - Log every attempt at debug and every failure unconditionally
//!
//! # Design Decisions
//! - No retries, no circuit breaking, transport default timeouts only;
//!   a failed call is terminal for that call and the caller decides
//!   whether siblings proceed
//! - The workflow document is opaque and forwarded unchanged

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::endpoint::types::{ExecuteRequest, SERVE_PATH, TERMINATE_PATH};

/// Client for the two remote endpoint operations.
#[derive(Debug, Clone)]
pub struct EndpointClient {
    http: reqwest::Client,
}

impl EndpointClient {
    /// Create a new client with a shared connection pool.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Tell the endpoint to terminate any running workflow.
    ///
    /// Returns `false` on any transport error or non-2xx status; never
    /// propagates an error to the caller.
    pub async fn terminate(&self, url: &str) -> bool {
        let target = format!("http://{}{}", url, TERMINATE_PATH);
        tracing::debug!(url = %url, "Sending terminate request");

        // Terminate takes no body; the endpoint still requires the JSON
        // content type.
        let request = self
            .http
            .post(&target)
            .header(CONTENT_TYPE, "application/json");

        match request.send().await {
            Ok(response) => {
                let success = response.status().is_success();
                if success {
                    tracing::debug!(url = %url, "Terminate succeeded");
                } else {
                    tracing::warn!(
                        url = %url,
                        status = %response.status(),
                        "Terminate failed: non-success status"
                    );
                }
                success
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Terminate failed: transport error");
                false
            }
        }
    }

    /// Tell the endpoint to serve a workflow document on the given port.
    ///
    /// Same failure contract as [`terminate`](Self::terminate).
    pub async fn execute(&self, url: &str, port: u16, workflow_api: &Value) -> bool {
        let target = format!("http://{}{}", url, SERVE_PATH);
        tracing::debug!(url = %url, port, "Sending execute request");

        let body = ExecuteRequest::new(port, workflow_api.clone());

        match self.http.post(&target).json(&body).send().await {
            Ok(response) => {
                let success = response.status().is_success();
                if success {
                    tracing::debug!(url = %url, port, "Execute succeeded");
                } else {
                    tracing::warn!(
                        url = %url,
                        port,
                        status = %response.status(),
                        "Execute failed: non-success status"
                    );
                }
                success
            }
            Err(e) => {
                tracing::warn!(url = %url, port, error = %e, "Execute failed: transport error");
                false
            }
        }
    }
}

impl Default for EndpointClient {
    fn default() -> Self {
        Self::new()
    }
}
