//! HTTP client for the workspace REST API.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::WorkspaceConfig;
use crate::workspace::connections::ConnectionInfo;
use crate::workspace::error::ClientError;
use crate::workspace::secrets::{SecretEntry, SecretListResponse};
use crate::workspace::statements::{StatementRequest, StatementResponse};
use crate::workspace::WorkspaceApi;

const STATEMENTS_PATH: &str = "/api/2.0/sql/statements";
const CONNECTIONS_PATH: &str = "/api/2.1/unity-catalog/connections";
const SECRETS_PATH: &str = "/api/2.0/secrets/list";

const USER_AGENT: &str = concat!("regdoctor/", env!("CARGO_PKG_VERSION"));

/// Authenticated client for one workspace.
///
/// All calls use bearer authentication with the configured token and share a
/// single request timeout.
pub struct WorkspaceClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
    timeout: Duration,
}

impl WorkspaceClient {
    pub fn new(config: &WorkspaceConfig) -> Self {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            base_url: config.host.clone(),
            token: config.token.clone(),
            http,
            timeout,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        self.read_json(path, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        self.read_json(path, response).await
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("workspace API returned {} for {}", status, path);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: api_error_message(status, &body),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::InvalidResponse {
                message: e.to_string(),
            })
    }

    fn map_send_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else if err.is_connect() {
            ClientError::Network {
                message: format!("failed to connect to {}: {}", self.base_url, err),
            }
        } else {
            ClientError::Network {
                message: err.to_string(),
            }
        }
    }
}

impl fmt::Debug for WorkspaceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkspaceClient")
            .field("base_url", &self.base_url)
            .field("token", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl WorkspaceApi for WorkspaceClient {
    async fn execute_statement(
        &self,
        request: StatementRequest,
    ) -> Result<StatementResponse, ClientError> {
        debug!("executing statement on warehouse {}", request.warehouse_id);
        let response: StatementResponse = self.post_json(STATEMENTS_PATH, &request).await?;
        response.into_succeeded()
    }

    async fn get_connection(&self, name: &str) -> Result<ConnectionInfo, ClientError> {
        debug!("fetching connection '{}'", name);
        self.get_json(&format!("{CONNECTIONS_PATH}/{name}"), &[])
            .await
    }

    async fn list_secrets(&self, scope: &str) -> Result<Vec<SecretEntry>, ClientError> {
        debug!("listing secret keys in scope '{}'", scope);
        let response: SecretListResponse = self.get_json(SECRETS_PATH, &[("scope", scope)]).await?;
        Ok(response.secrets)
    }
}

/// Service errors arrive as `{"error_code": ..., "message": ...}`. Fall back
/// to the raw body, then to the status line, when that shape is absent.
fn api_error_message(status: StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ApiErrorBody {
        error_code: Option<String>,
        message: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = parsed.message {
            return message;
        }
        if let Some(code) = parsed.error_code {
            return code;
        }
    }
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string();
    }
    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_service_message() {
        let body = r#"{"error_code": "RESOURCE_DOES_NOT_EXIST", "message": "Scope 'demo' does not exist!"}"#;
        let message = api_error_message(StatusCode::NOT_FOUND, body);
        assert_eq!(message, "Scope 'demo' does not exist!");
    }

    #[test]
    fn error_message_falls_back_to_error_code() {
        let body = r#"{"error_code": "PERMISSION_DENIED"}"#;
        let message = api_error_message(StatusCode::FORBIDDEN, body);
        assert_eq!(message, "PERMISSION_DENIED");
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        let message = api_error_message(StatusCode::BAD_GATEWAY, "upstream unavailable");
        assert_eq!(message, "upstream unavailable");
    }

    #[test]
    fn error_message_falls_back_to_status_reason() {
        let message = api_error_message(StatusCode::NOT_FOUND, "");
        assert_eq!(message, "Not Found");
    }

    #[test]
    fn debug_output_hides_token() {
        let config = WorkspaceConfig {
            host: "https://example.cloud.databricks.com".to_string(),
            token: "dapi-secret-token".to_string(),
            request_timeout_secs: 60,
        };
        let client = WorkspaceClient::new(&config);
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("dapi-secret-token"));
        assert!(rendered.contains("example.cloud.databricks.com"));
    }
}
