//! Wire types for the SQL statement execution API.
//!
//! Statements run synchronously from the caller's point of view: the request
//! asks the service to wait for completion and cancel on timeout, so a
//! response always describes a terminal state.

use serde::{Deserialize, Serialize};

use crate::workspace::error::ClientError;

/// How long the service itself waits for the statement before giving up.
pub const DEFAULT_WAIT_TIMEOUT: &str = "30s";

const STATE_SUCCEEDED: &str = "SUCCEEDED";

/// A named parameter bound to a statement, always typed as `STRING`.
#[derive(Debug, Clone, Serialize)]
pub struct StatementParameter {
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

/// Request body for `POST /api/2.0/sql/statements`.
#[derive(Debug, Clone, Serialize)]
pub struct StatementRequest {
    pub statement: String,
    pub warehouse_id: String,
    pub wait_timeout: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_wait_timeout: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<StatementParameter>,
}

impl StatementRequest {
    pub fn new(warehouse_id: impl Into<String>, statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            warehouse_id: warehouse_id.into(),
            wait_timeout: DEFAULT_WAIT_TIMEOUT.to_string(),
            on_wait_timeout: Some("CANCEL".to_string()),
            parameters: Vec::new(),
        }
    }

    /// Binds a named `STRING` parameter, e.g. `:api_id` in the statement text.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(StatementParameter {
            name: name.into(),
            value: value.into(),
            param_type: "STRING".to_string(),
        });
        self
    }
}

/// Terminal status of an executed statement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatementStatus {
    #[serde(default)]
    pub state: String,
    pub error: Option<StatementStatusError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatementStatusError {
    pub error_code: Option<String>,
    pub message: Option<String>,
}

/// Column metadata from the result manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub type_text: Option<String>,
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultSchema {
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultManifest {
    pub schema: ResultSchema,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultData {
    #[serde(default)]
    pub data_array: Vec<Vec<Option<String>>>,
    pub row_count: Option<i64>,
}

/// Response body for a statement execution call.
#[derive(Debug, Clone, Deserialize)]
pub struct StatementResponse {
    pub statement_id: Option<String>,
    #[serde(default)]
    pub status: StatementStatus,
    pub manifest: Option<ResultManifest>,
    pub result: Option<ResultData>,
}

impl StatementResponse {
    /// Returns the response unchanged when the statement succeeded, otherwise
    /// a [`ClientError::Statement`] carrying the service's failure message.
    pub fn into_succeeded(self) -> Result<Self, ClientError> {
        if self.status.state == STATE_SUCCEEDED {
            return Ok(self);
        }
        let message = self
            .status
            .error
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| "no error details returned".to_string());
        Err(ClientError::Statement {
            state: self.status.state,
            message,
        })
    }

    /// Result rows, empty when the response carried no result payload.
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        self.result
            .as_ref()
            .map(|r| r.data_array.as_slice())
            .unwrap_or(&[])
    }

    /// Manifest columns, empty when the response carried no manifest.
    pub fn columns(&self) -> &[ColumnInfo] {
        self.manifest
            .as_ref()
            .map(|m| m.schema.columns.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_bound_parameters() {
        let request = StatementRequest::new("warehouse1", "SELECT 1 WHERE id = :api_id")
            .with_param("api_id", "abc-123");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["warehouse_id"], "warehouse1");
        assert_eq!(json["wait_timeout"], "30s");
        assert_eq!(json["on_wait_timeout"], "CANCEL");
        assert_eq!(json["parameters"][0]["name"], "api_id");
        assert_eq!(json["parameters"][0]["value"], "abc-123");
        assert_eq!(json["parameters"][0]["type"], "STRING");
    }

    #[test]
    fn request_omits_empty_parameter_list() {
        let request = StatementRequest::new("warehouse1", "SELECT 1");
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("parameters").is_none());
        assert!(json.get("on_wait_timeout").is_some());
    }

    #[test]
    fn parses_succeeded_response_with_rows() {
        let body = r#"{
            "statement_id": "stmt-1",
            "status": {"state": "SUCCEEDED"},
            "manifest": {"schema": {"columns": [
                {"name": "api_id", "type_text": "STRING", "position": 0},
                {"name": "api_name", "type_text": "STRING", "position": 1}
            ]}},
            "result": {"data_array": [["abc-123", "weather"]], "row_count": 1}
        }"#;
        let response: StatementResponse = serde_json::from_str(body).unwrap();
        let response = response.into_succeeded().unwrap();
        assert_eq!(response.columns().len(), 2);
        assert_eq!(response.columns()[1].name, "api_name");
        assert_eq!(response.rows().len(), 1);
        assert_eq!(response.rows()[0][0].as_deref(), Some("abc-123"));
    }

    #[test]
    fn failed_state_becomes_statement_error() {
        let body = r#"{
            "statement_id": "stmt-2",
            "status": {
                "state": "FAILED",
                "error": {"error_code": "BAD_REQUEST", "message": "TABLE_OR_VIEW_NOT_FOUND"}
            }
        }"#;
        let response: StatementResponse = serde_json::from_str(body).unwrap();
        let err = response.into_succeeded().unwrap_err();
        match err {
            ClientError::Statement { state, message } => {
                assert_eq!(state, "FAILED");
                assert!(message.contains("TABLE_OR_VIEW_NOT_FOUND"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_result_yields_empty_rows() {
        let body = r#"{"statement_id": "stmt-3", "status": {"state": "SUCCEEDED"}}"#;
        let response: StatementResponse = serde_json::from_str(body).unwrap();
        assert!(response.rows().is_empty());
        assert!(response.columns().is_empty());
    }
}
