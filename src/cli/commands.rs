use clap::Parser;

use crate::diagnose::DiagnoseTarget;

/// Shown under the help text and after argument errors.
pub const USAGE_EXAMPLE: &str = "regdoctor abc-123 1234567890abcdef my_catalog my_schema";

/// Diagnostic tool for HTTP API registrations
#[derive(Parser, Debug)]
#[command(
    name = "regdoctor",
    about = "Diagnoses one HTTP API registration: registry row, connection, and secret wiring",
    version,
    long_about = "regdoctor walks through an HTTP API registration step by step: it looks up \
                  the registry row on a SQL warehouse, cross-checks the managed connection it \
                  points at, verifies the secret scope matches the auth type, and prints a \
                  ready-to-run http_request query for manual testing.",
    after_help = format!("Example:\n  {}", USAGE_EXAMPLE)
)]
pub struct CliArgs {
    #[arg(value_name = "API_ID", help = "Registry id of the API to inspect")]
    pub api_id: String,

    #[arg(
        value_name = "WAREHOUSE_ID",
        help = "SQL warehouse to run the registry lookup on"
    )]
    pub warehouse_id: String,

    #[arg(value_name = "CATALOG", help = "Catalog holding the registry table")]
    pub catalog: String,

    #[arg(value_name = "SCHEMA", help = "Schema holding the registry table")]
    pub schema: String,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Verbose output (debug logging)")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

impl CliArgs {
    pub fn target(&self) -> DiagnoseTarget {
        DiagnoseTarget {
            api_id: self.api_id.clone(),
            warehouse_id: self.warehouse_id.clone(),
            catalog: self.catalog.clone(),
            schema: self.schema.clone(),
        }
    }
}
