//! Canned in-memory implementation of [`WorkspaceApi`].
//!
//! Lives in the library (not behind `cfg(test)`) so integration tests can
//! drive the diagnoser without a workspace. Responses are queued per call
//! kind and handed out in FIFO order.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::workspace::connections::ConnectionInfo;
use crate::workspace::error::ClientError;
use crate::workspace::secrets::SecretEntry;
use crate::workspace::statements::{StatementRequest, StatementResponse};
use crate::workspace::WorkspaceApi;

#[derive(Default)]
pub struct MockWorkspace {
    statements: Mutex<VecDeque<Result<StatementResponse, ClientError>>>,
    connections: Mutex<VecDeque<Result<ConnectionInfo, ClientError>>>,
    secrets: Mutex<VecDeque<Result<Vec<SecretEntry>, ClientError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_statement(&self, response: Result<StatementResponse, ClientError>) {
        self.statements.lock().unwrap().push_back(response);
    }

    pub fn queue_connection(&self, response: Result<ConnectionInfo, ClientError>) {
        self.connections.lock().unwrap().push_back(response);
    }

    pub fn queue_secrets(&self, response: Result<Vec<SecretEntry>, ClientError>) {
        self.secrets.lock().unwrap().push_back(response);
    }

    /// Calls seen so far, in order. Statement calls record the first bound
    /// parameter value, the others record their lookup argument.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn no_response(call: &str) -> ClientError {
    ClientError::InvalidResponse {
        message: format!("MockWorkspace: no queued response for {call}"),
    }
}

#[async_trait]
impl WorkspaceApi for MockWorkspace {
    async fn execute_statement(
        &self,
        request: StatementRequest,
    ) -> Result<StatementResponse, ClientError> {
        let call = match request.parameters.first() {
            Some(param) => format!("execute_statement:{}", param.value),
            None => "execute_statement".to_string(),
        };
        self.record(call);
        self.statements
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(no_response("execute_statement")))
    }

    async fn get_connection(&self, name: &str) -> Result<ConnectionInfo, ClientError> {
        self.record(format!("get_connection:{name}"));
        self.connections
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(no_response("get_connection")))
    }

    async fn list_secrets(&self, scope: &str) -> Result<Vec<SecretEntry>, ClientError> {
        self.record(format!("list_secrets:{scope}"));
        self.secrets
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(no_response("list_secrets")))
    }
}

impl fmt::Debug for MockWorkspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockWorkspace")
            .field("queued_statements", &self.statements.lock().unwrap().len())
            .field("queued_connections", &self.connections.lock().unwrap().len())
            .field("queued_secrets", &self.secrets.lock().unwrap().len())
            .field("calls", &self.calls.lock().unwrap().len())
            .finish()
    }
}
