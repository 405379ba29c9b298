//! Workspace REST API access.
//!
//! [`WorkspaceApi`] is the seam between the diagnosis logic and the actual
//! workspace: [`WorkspaceClient`] speaks HTTP to a real one, while
//! [`MockWorkspace`] replays canned responses in tests.

pub mod client;
pub mod connections;
pub mod error;
pub mod mock;
pub mod secrets;
pub mod statements;

pub use client::WorkspaceClient;
pub use connections::ConnectionInfo;
pub use error::ClientError;
pub use mock::MockWorkspace;
pub use secrets::SecretEntry;
pub use statements::{StatementRequest, StatementResponse};

use async_trait::async_trait;

/// The workspace calls a diagnosis needs.
#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    /// Runs a SQL statement to completion and returns its result. A statement
    /// that finishes in any state other than `SUCCEEDED` is an error.
    async fn execute_statement(
        &self,
        request: StatementRequest,
    ) -> Result<StatementResponse, ClientError>;

    /// Fetches a managed connection by name.
    async fn get_connection(&self, name: &str) -> Result<ConnectionInfo, ClientError>;

    /// Lists the secret keys in a scope. Secret values are never returned.
    async fn list_secrets(&self, scope: &str) -> Result<Vec<SecretEntry>, ClientError>;
}
