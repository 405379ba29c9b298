use regdoctor::cli::commands::{CliArgs, USAGE_EXAMPLE};
use regdoctor::config::{ConfigError, WorkspaceConfig};
use regdoctor::diagnose::Diagnoser;
use regdoctor::workspace::WorkspaceClient;
use regdoctor::VERSION;

use clap::error::ErrorKind;
use clap::Parser;
use std::env;
use std::sync::Arc;
use tracing::{debug, error, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let args = parse_args();
    init_logging_from_args(&args);

    debug!("regdoctor v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = handle_diagnose(&args).await;
    std::process::exit(exit_code);
}

/// Parses the command line, keeping exit codes distinct from clap's default:
/// help and version leave with clap's own success code, anything malformed
/// prints the error plus an invocation example and leaves with code 1.
fn parse_args() -> CliArgs {
    match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            eprintln!("\nExample:\n  {USAGE_EXAMPLE}");
            std::process::exit(1);
        }
    }
}

async fn handle_diagnose(args: &CliArgs) -> i32 {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("Error: {e}");
            return 1;
        }
    };
    debug!("{:?}", config);

    let client = WorkspaceClient::new(&config);
    let diagnoser = Diagnoser::new(Arc::new(client));
    let target = args.target();

    let mut stdout = std::io::stdout();
    if let Err(e) = diagnoser.run(&target, &mut stdout).await {
        error!("Failed to write report: {}", e);
        eprintln!("Error: {e}");
        return 1;
    }
    0
}

fn load_config() -> Result<WorkspaceConfig, ConfigError> {
    let config = WorkspaceConfig::from_env()?;
    config.validate()?;
    Ok(config)
}

fn init_logging_from_args(args: &CliArgs) {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let level = if let Some(level_str) = &args.log_level {
            parse_level(level_str)
        } else if args.verbose {
            Level::DEBUG
        } else if args.quiet {
            Level::ERROR
        } else {
            let level_str = env::var("REGDOCTOR_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
            parse_level(&level_str)
        };

        let mut filter = EnvFilter::from_default_env();

        if env::var("RUST_LOG").is_err() {
            filter = filter
                .add_directive(format!("regdoctor={}", level).parse().unwrap())
                .add_directive("h2=warn".parse().unwrap())
                .add_directive("hyper=warn".parse().unwrap())
                .add_directive("reqwest=warn".parse().unwrap());
        }

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    });
}

fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to WARN. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::WARN
        }
    }
}
