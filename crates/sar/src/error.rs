//! CLI error types.

use sar_config::ConfigError;
use sar_core::{CheckError, RetrieveError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("reading input from stdin: {0}")]
    ReadInput(#[source] serde_json::Error),

    #[error("writing output to stdout: {0}")]
    WriteOutput(#[source] serde_json::Error),

    #[error("running check with slack client: {0}")]
    Check(#[from] CheckError),

    #[error("running in with slack client: {0}")]
    Retrieve(#[from] RetrieveError),

    #[error("{0}")]
    Validation(String),
}
