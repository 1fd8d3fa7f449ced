//! Slack attachment resource CLI.
//!
//! Implements the pipeline resource protocol:
//! - `check`: Report new versions of the tracked attachment
//! - `in <dir>`: Download one version into a directory
//! - `out [dir]`: Echo the given version back
//!
//! Every command reads a JSON request from stdin and writes a JSON response
//! to stdout. Logs and diagnostics go to stderr.

mod commands;
mod error;
mod output;
mod protocol;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{InArgs, OutArgs};
use output::Output;

/// Slack attachment resource.
#[derive(Parser)]
#[command(name = "sar", version, about)]
struct Cli {
    /// Enable info-level logging on stderr.
    #[arg(short, long, global = true, env = "SAR_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report versions of the attachment.
    Check,
    /// Fetch a version of the attachment.
    In(InArgs),
    /// Echo the given version (uploading is not supported).
    Out(OutArgs),
}

/// Log filter for stderr.
///
/// `--verbose` enables INFO level, otherwise `RUST_LOG` is used. An unset,
/// empty or unparsable `RUST_LOG` falls back to WARN.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() {
    let cli = Cli::parse();
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = log_filter(cli.verbose, rust_log.as_deref());
    // stdout carries the protocol response, so logs must go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check => commands::check::execute(),
        Commands::In(args) => args.execute(),
        Commands::Out(args) => args.execute(),
    };

    if let Err(err) = result {
        Output::stderr().failed(&err);
        std::process::exit(1);
    }
}
