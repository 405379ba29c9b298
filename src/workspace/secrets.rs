//! Wire types for the secrets API.

use serde::Deserialize;

/// Metadata for one secret key inside a scope. Values are never returned.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretEntry {
    pub key: String,
    pub last_updated_timestamp: Option<i64>,
}

/// Response body for `GET /api/2.0/secrets/list?scope={scope}`.
///
/// An empty scope comes back without the `secrets` field at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SecretListResponse {
    #[serde(default)]
    pub secrets: Vec<SecretEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_secret_list() {
        let body = r#"{"secrets": [
            {"key": "api_key", "last_updated_timestamp": 1700000000000},
            {"key": "bearer_token"}
        ]}"#;
        let response: SecretListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.secrets.len(), 2);
        assert_eq!(response.secrets[0].key, "api_key");
        assert!(response.secrets[1].last_updated_timestamp.is_none());
    }

    #[test]
    fn missing_secrets_field_means_empty_scope() {
        let response: SecretListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.secrets.is_empty());
    }
}
