//! The diagnosis itself: six steps from registry row to summary.
//!
//! The report is written step by step to any [`Write`] sink. Failures in the
//! first two steps end the diagnosis early because nothing later would be
//! meaningful; a failing secret scope check is advisory and the remaining
//! steps still run.

pub mod sql;
pub mod summary;

use std::io::{self, Write};
use std::sync::Arc;

use tracing::{debug, info};

use crate::registry::{lookup_statement, registry_table, BearerTokenState, RegistryRecord};
use crate::workspace::{StatementRequest, WorkspaceApi};

const RULE_WIDTH: usize = 80;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Which registration to inspect and where the registry lives.
#[derive(Debug, Clone)]
pub struct DiagnoseTarget {
    pub api_id: String,
    pub warehouse_id: String,
    pub catalog: String,
    pub schema: String,
}

impl DiagnoseTarget {
    /// Qualifies an object name with this target's catalog and schema.
    pub fn qualified(&self, object: &str) -> String {
        format!("{}.{}.{}", self.catalog, self.schema, object)
    }
}

/// Runs the diagnosis steps against a workspace and writes the report.
pub struct Diagnoser {
    client: Arc<dyn WorkspaceApi>,
}

impl Diagnoser {
    pub fn new(client: Arc<dyn WorkspaceApi>) -> Self {
        Self { client }
    }

    /// Writes the full report for one registration.
    ///
    /// Returns `Ok` for completed and aborted diagnoses alike; `Err` only
    /// when the sink itself fails.
    pub async fn run<W: Write>(&self, target: &DiagnoseTarget, out: &mut W) -> io::Result<()> {
        info!(
            "diagnosing api_id '{}' in {}.{}",
            target.api_id, target.catalog, target.schema
        );
        writeln!(out)?;
        writeln!(out, "{}", rule())?;
        writeln!(out, "🔍 API Registration Doctor")?;
        writeln!(out, "{}", rule())?;
        writeln!(out)?;

        let record = match self.check_registry(target, out).await? {
            Some(record) => record,
            None => return Ok(()),
        };
        writeln!(out)?;

        let connection_name = target.qualified(&record.connection_name);
        let bearer = match self.check_connection(&connection_name, out).await? {
            Some(bearer) => bearer,
            None => return Ok(()),
        };
        writeln!(out)?;

        self.check_secrets(&record, out).await?;
        writeln!(out)?;

        writeln!(out, "🧪 Step 4: Testing connection...")?;
        writeln!(out, "   (Skipping - would require serving endpoints API)")?;
        writeln!(out)?;

        writeln!(out, "📝 Step 5: Generated test SQL:")?;
        writeln!(out)?;
        writeln!(out, "```sql")?;
        writeln!(out, "{}", sql::http_request_example(&record, &connection_name))?;
        writeln!(out, "```")?;
        writeln!(out)?;

        self.write_summary(&record, &bearer, out)
    }

    async fn check_registry<W: Write>(
        &self,
        target: &DiagnoseTarget,
        out: &mut W,
    ) -> io::Result<Option<RegistryRecord>> {
        writeln!(out, "📊 Step 1: Checking API registry...")?;
        let record = match self.fetch_record(target).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                writeln!(
                    out,
                    "❌ API with id '{}' not found in registry!",
                    target.api_id
                )?;
                writeln!(
                    out,
                    "   Table: {}",
                    registry_table(&target.catalog, &target.schema)
                )?;
                return Ok(None);
            }
            Err(e) => {
                writeln!(out, "❌ Error querying registry: {e}")?;
                return Ok(None);
            }
        };
        writeln!(out, "✅ API found in registry:")?;
        writeln!(out, "   Name: {}", record.api_name)?;
        writeln!(out, "   Connection: {}", record.connection_name)?;
        writeln!(out, "   Auth Type: {}", record.auth_type)?;
        writeln!(
            out,
            "   Secret Scope: {}",
            record.secret_scope.as_deref().unwrap_or("(none)")
        )?;
        writeln!(out, "   Status: {}", record.status)?;
        writeln!(out, "   Endpoint: {}", record.endpoint())?;
        Ok(Some(record))
    }

    /// Looks up the registry row and decodes it. Transport failures and
    /// undecodable rows surface as one error; zero rows is `Ok(None)`.
    async fn fetch_record(
        &self,
        target: &DiagnoseTarget,
    ) -> anyhow::Result<Option<RegistryRecord>> {
        let statement = lookup_statement(&target.catalog, &target.schema);
        let request = StatementRequest::new(&target.warehouse_id, statement)
            .with_param("api_id", &target.api_id);
        let response = self.client.execute_statement(request).await?;
        let record = match response.rows().first() {
            Some(row) => RegistryRecord::from_row(response.columns(), row)?,
            None => return Ok(None),
        };
        debug!("decoded registry row for '{}'", record.api_id);
        Ok(Some(record))
    }

    /// `connection_name` is already qualified with catalog and schema.
    async fn check_connection<W: Write>(
        &self,
        connection_name: &str,
        out: &mut W,
    ) -> io::Result<Option<BearerTokenState>> {
        writeln!(out, "🔌 Step 2: Checking HTTP connection...")?;
        let conn = match self.client.get_connection(connection_name).await {
            Ok(conn) => conn,
            Err(e) => {
                writeln!(out, "❌ Connection not found or error: {e}")?;
                writeln!(out, "   Expected name: {connection_name}")?;
                return Ok(None);
            }
        };
        writeln!(out, "✅ Connection exists: {connection_name}")?;
        writeln!(out, "   Host: {}", conn.option("host").unwrap_or("N/A"))?;
        writeln!(
            out,
            "   Base Path: {}",
            conn.option("base_path").unwrap_or("N/A")
        )?;
        writeln!(out, "   Owner: {}", conn.owner.as_deref().unwrap_or("N/A"))?;
        let bearer = BearerTokenState::classify(conn.option("bearer_token"));
        match &bearer {
            BearerTokenState::Empty => {
                writeln!(out, "   Bearer Token: EMPTY ✅ (correct for api_key or none auth)")?;
            }
            BearerTokenState::SecretRef => {
                writeln!(
                    out,
                    "   Bearer Token: SECRET REFERENCE ✅ (correct for bearer_token auth)"
                )?;
            }
            BearerTokenState::Other(value) => {
                writeln!(out, "   Bearer Token: {value}")?;
            }
            BearerTokenState::Missing => {
                writeln!(out, "   Bearer Token: NOT_SET")?;
            }
        }
        Ok(Some(bearer))
    }

    async fn check_secrets<W: Write>(
        &self,
        record: &RegistryRecord,
        out: &mut W,
    ) -> io::Result<()> {
        let (scope, expected_key) = match (
            record.secret_scope.as_deref(),
            record.auth_type.expected_secret_key(),
        ) {
            (Some(scope), Some(key)) => (scope, key),
            _ => {
                writeln!(
                    out,
                    "🔐 Step 3: Secret scope not needed (auth_type={})",
                    record.auth_type
                )?;
                return Ok(());
            }
        };
        writeln!(out, "🔐 Step 3: Checking secret scope...")?;
        match self.client.list_secrets(scope).await {
            Ok(secrets) => {
                writeln!(out, "✅ Secret scope exists: {scope}")?;
                writeln!(out, "   Number of secrets: {}", secrets.len())?;
                let keys: Vec<&str> = secrets.iter().map(|s| s.key.as_str()).collect();
                if keys.contains(&expected_key) {
                    writeln!(out, "   ✅ Expected secret key '{expected_key}' found")?;
                } else {
                    writeln!(out, "   ❌ Expected secret key '{expected_key}' NOT FOUND")?;
                    writeln!(out, "   Available keys: {keys:?}")?;
                }
            }
            Err(e) => {
                writeln!(out, "❌ Error accessing secret scope: {e}")?;
                if e.to_string().to_lowercase().contains("does not exist") {
                    writeln!(out, "   The secret scope '{scope}' doesn't exist!")?;
                    writeln!(out, "   Create it with: databricks secrets create-scope {scope}")?;
                }
            }
        }
        Ok(())
    }

    fn write_summary<W: Write>(
        &self,
        record: &RegistryRecord,
        bearer: &BearerTokenState,
        out: &mut W,
    ) -> io::Result<()> {
        writeln!(out, "{}", rule())?;
        writeln!(out, "📋 Summary")?;
        writeln!(out, "{}", rule())?;
        writeln!(out)?;
        let (heading, bullets) = summary::expected_shape(record.auth_type);
        writeln!(out, "✅ {heading}")?;
        for bullet in bullets {
            writeln!(out, "   - {bullet}")?;
        }
        writeln!(out)?;
        let issues = summary::collect_issues(record.auth_type, bearer);
        if issues.is_empty() {
            writeln!(out, "✅ Configuration looks correct!")?;
        } else {
            writeln!(out, "⚠️  Potential Issues Found:")?;
            for issue in &issues {
                writeln!(out, "   - {issue}")?;
            }
        }
        writeln!(out)?;
        writeln!(out, "{}", rule())?;
        writeln!(out)?;
        Ok(())
    }
}
