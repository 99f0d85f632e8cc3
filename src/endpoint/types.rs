//! Wire types for the endpoint serve API.

use serde::Serialize;
use serde_json::Value;

/// Path of the serve operation, relative to the endpoint authority.
pub const SERVE_PATH: &str = "/api/bentoml/serve";

/// Path of the terminate operation.
pub const TERMINATE_PATH: &str = "/api/bentoml/serve/terminate";

/// Host value instructing the endpoint to listen on all interfaces.
pub const BIND_ALL_INTERFACES: &str = "0.0.0.0";

/// Body of the serve request.
///
/// The endpoint expects the port stringified; the workflow document is
/// passed through untouched.
#[derive(Debug, Clone, Serialize)]
pub struct ExecuteRequest {
    pub parallel: bool,
    pub host: &'static str,
    pub port: String,
    pub workflow_api: Value,
}

impl ExecuteRequest {
    pub fn new(port: u16, workflow_api: Value) -> Self {
        Self {
            parallel: true,
            host: BIND_ALL_INTERFACES,
            port: port.to_string(),
            workflow_api,
        }
    }
}
