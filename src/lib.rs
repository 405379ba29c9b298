//! regdoctor - diagnostics for HTTP API registrations
//!
//! This library inspects one row of an HTTP API registry and everything that
//! row points at: the managed connection it names and the secret scope its
//! auth type requires. The result is a step-by-step report plus a ready-to-run
//! `http_request` query for manual testing.
//!
//! # Core Concepts
//!
//! - **Registry**: a catalog table (`api_http_registry`) with one row per
//!   registered API, queried through a SQL warehouse
//! - **Connection**: the managed HTTP connection a registration points at,
//!   whose `bearer_token` option must match the registered auth type
//! - **Auth types**: `none`, `api_key`, and `bearer_token`, each with its own
//!   expected connection shape and secret scope contents
//!
//! # Example Usage
//!
//! ```ignore
//! use regdoctor::{DiagnoseTarget, Diagnoser, WorkspaceClient, WorkspaceConfig};
//! use std::sync::Arc;
//!
//! async fn diagnose() -> std::io::Result<()> {
//!     let config = WorkspaceConfig::from_env().expect("workspace credentials");
//!     let client = WorkspaceClient::new(&config);
//!     let diagnoser = Diagnoser::new(Arc::new(client));
//!
//!     let target = DiagnoseTarget {
//!         api_id: "abc-123".to_string(),
//!         warehouse_id: "1234567890abcdef".to_string(),
//!         catalog: "main".to_string(),
//!         schema: "apis".to_string(),
//!     };
//!     diagnoser.run(&target, &mut std::io::stdout()).await
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`workspace`]: REST client for statements, connections, and secrets
//! - [`registry`]: registry row decoding and auth type rules
//! - [`diagnose`]: the six diagnosis steps and report rendering

// Public modules
pub mod cli;
pub mod config;
pub mod diagnose;
pub mod registry;
pub mod workspace;

// Re-export key types for convenient access
pub use config::{ConfigError, WorkspaceConfig};
pub use diagnose::{DiagnoseTarget, Diagnoser};
pub use registry::{AuthType, BearerTokenState, DecodeError, RegistryRecord};
pub use workspace::{ClientError, MockWorkspace, WorkspaceApi, WorkspaceClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
