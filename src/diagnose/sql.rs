//! Ready-to-run `http_request` SQL for each auth mode.

use crate::registry::{AuthType, RegistryRecord};

/// Stands in for the scope name when the registration has none configured.
pub const SCOPE_PLACEHOLDER: &str = "<secret-scope>";

/// Builds a test query the user can paste into a SQL editor.
///
/// The shape follows the auth mode: `api_key` pulls the key from the secret
/// scope into the request parameters, `bearer_token` relies on the connection
/// to inject the token and only scaffolds user parameters, and `none` skips
/// parameters entirely.
pub fn http_request_example(record: &RegistryRecord, connection_name: &str) -> String {
    let method = &record.http_method;
    let path = &record.api_path;
    match record.auth_type {
        AuthType::ApiKey => {
            let scope = record.secret_scope.as_deref().unwrap_or(SCOPE_PLACEHOLDER);
            format!(
                "SELECT http_request(
  conn => '{connection_name}',
  method => '{method}',
  path => '{path}',
  params => map(
    'api_key', secret('{scope}', 'api_key'),
    -- Add your parameters here
    'param1', 'value1'
  ),
  headers => map('Accept', 'application/json')
);"
            )
        }
        AuthType::BearerToken => format!(
            "SELECT http_request(
  conn => '{connection_name}',
  method => '{method}',
  path => '{path}',
  params => map(
    -- Add your parameters here
    'param1', 'value1'
  ),
  headers => map('Accept', 'application/json')
);"
        ),
        AuthType::None => format!(
            "SELECT http_request(
  conn => '{connection_name}',
  method => '{method}',
  path => '{path}',
  headers => map('Accept', 'application/json')
);"
        ),
    }
}
