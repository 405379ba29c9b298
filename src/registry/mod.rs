//! The HTTP API registry: auth modes and registry row decoding.

pub mod auth;
pub mod record;

pub use auth::{AuthType, BearerTokenState, ParseAuthTypeError, SECRET_REF_MARKER};
pub use record::{
    lookup_statement, registry_table, DecodeError, RegistryRecord, REGISTRY_COLUMNS,
    REGISTRY_TABLE,
};
