//! Authentication modes and bearer token classification.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Marker that distinguishes a secret reference from a literal token value
/// in a connection's `bearer_token` option.
pub const SECRET_REF_MARKER: &str = "secret(";

/// How an API in the registry authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    /// Public API, no credentials.
    None,
    /// Key passed in request parameters at call time.
    ApiKey,
    /// Token injected into the `Authorization` header by the connection.
    BearerToken,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown auth_type '{0}' (expected none, api_key, or bearer_token)")]
pub struct ParseAuthTypeError(pub String);

impl FromStr for AuthType {
    type Err = ParseAuthTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(AuthType::None),
            "api_key" => Ok(AuthType::ApiKey),
            "bearer_token" => Ok(AuthType::BearerToken),
            other => Err(ParseAuthTypeError(other.to_string())),
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthType::None => "none",
            AuthType::ApiKey => "api_key",
            AuthType::BearerToken => "bearer_token",
        };
        f.write_str(name)
    }
}

impl AuthType {
    /// The secret key this auth mode expects inside the scope, if any.
    pub fn expected_secret_key(&self) -> Option<&'static str> {
        match self {
            AuthType::None => None,
            AuthType::ApiKey => Some("api_key"),
            AuthType::BearerToken => Some("bearer_token"),
        }
    }
}

/// What a connection's `bearer_token` option actually holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BearerTokenState {
    /// Present and empty, the expected shape for `api_key` and `none` auth.
    Empty,
    /// References a secret, the expected shape for `bearer_token` auth.
    SecretRef,
    /// Some other literal value.
    Other(String),
    /// The option is not set at all.
    Missing,
}

impl BearerTokenState {
    pub fn classify(value: Option<&str>) -> Self {
        match value {
            None => BearerTokenState::Missing,
            Some("") => BearerTokenState::Empty,
            Some(v) if v.contains(SECRET_REF_MARKER) => BearerTokenState::SecretRef,
            Some(v) => BearerTokenState::Other(v.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BearerTokenState::Empty)
    }

    pub fn is_secret_ref(&self) -> bool {
        matches!(self, BearerTokenState::SecretRef)
    }
}
