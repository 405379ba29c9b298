//! Wire types for the Unity Catalog connections API.

use std::collections::HashMap;

use serde::Deserialize;

/// A managed connection as returned by
/// `GET /api/2.1/unity-catalog/connections/{name}`.
///
/// The interesting configuration (host, base path, bearer token) lives in the
/// free-form `options` map rather than in dedicated fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionInfo {
    #[serde(default)]
    pub name: String,
    pub connection_type: Option<String>,
    #[serde(default)]
    pub options: HashMap<String, String>,
    pub owner: Option<String>,
}

impl ConnectionInfo {
    /// Looks up a single option by key.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}
