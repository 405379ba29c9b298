pub mod commands;

pub use commands::{CliArgs, USAGE_EXAMPLE};
