//! The API registry table and its row decoding.

use std::collections::HashMap;

use thiserror::Error;

use crate::registry::auth::{AuthType, ParseAuthTypeError};
use crate::workspace::statements::ColumnInfo;

/// Unqualified name of the registry table inside the catalog schema.
pub const REGISTRY_TABLE: &str = "api_http_registry";

/// Columns the lookup selects, in declaration order. Decoding goes through
/// the result manifest, so the service is free to reorder them.
pub const REGISTRY_COLUMNS: [&str; 10] = [
    "api_id",
    "api_name",
    "connection_name",
    "host",
    "base_path",
    "api_path",
    "auth_type",
    "secret_scope",
    "http_method",
    "status",
];

/// Fully qualified registry table name.
pub fn registry_table(catalog: &str, schema: &str) -> String {
    format!("{catalog}.{schema}.{REGISTRY_TABLE}")
}

/// Lookup statement for one registration. `api_id` is bound as a named
/// parameter; catalog and schema are identifiers and cannot be bound, so
/// they are interpolated into the table name.
pub fn lookup_statement(catalog: &str, schema: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE api_id = :api_id",
        REGISTRY_COLUMNS.join(", "),
        registry_table(catalog, schema)
    )
}

/// Errors turning a result row into a [`RegistryRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("result manifest has {expected} columns but the row has {got}")]
    ColumnCountMismatch { expected: usize, got: usize },
    #[error("column '{0}' missing from result manifest")]
    MissingColumn(&'static str),
    #[error("column '{0}' is NULL")]
    NullColumn(&'static str),
    #[error(transparent)]
    InvalidAuthType(#[from] ParseAuthTypeError),
}

/// One decoded registry row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryRecord {
    pub api_id: String,
    pub api_name: String,
    pub connection_name: String,
    pub host: String,
    pub base_path: Option<String>,
    pub api_path: String,
    pub auth_type: AuthType,
    pub secret_scope: Option<String>,
    pub http_method: String,
    pub status: String,
}

impl RegistryRecord {
    /// Decodes a row using the manifest's column names for positions.
    ///
    /// Optional columns treat both NULL and the empty string as absent.
    pub fn from_row(columns: &[ColumnInfo], row: &[Option<String>]) -> Result<Self, DecodeError> {
        if columns.len() != row.len() {
            return Err(DecodeError::ColumnCountMismatch {
                expected: columns.len(),
                got: row.len(),
            });
        }
        let index: HashMap<&str, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.as_str(), i))
            .collect();
        let required = |name: &'static str| -> Result<String, DecodeError> {
            let i = *index.get(name).ok_or(DecodeError::MissingColumn(name))?;
            row[i].clone().ok_or(DecodeError::NullColumn(name))
        };
        let optional = |name: &'static str| -> Result<Option<String>, DecodeError> {
            let i = *index.get(name).ok_or(DecodeError::MissingColumn(name))?;
            Ok(row[i].clone().filter(|v| !v.is_empty()))
        };

        Ok(Self {
            api_id: required("api_id")?,
            api_name: required("api_name")?,
            connection_name: required("connection_name")?,
            host: required("host")?,
            base_path: optional("base_path")?,
            api_path: required("api_path")?,
            auth_type: required("auth_type")?.parse()?,
            secret_scope: optional("secret_scope")?,
            http_method: required("http_method")?,
            status: required("status")?,
        })
    }

    /// Full endpoint URL: host, then base path if any, then the API path.
    pub fn endpoint(&self) -> String {
        format!(
            "{}{}{}",
            self.host,
            self.base_path.as_deref().unwrap_or(""),
            self.api_path
        )
    }
}
