//! `sar out` command implementation.

use std::io;
use std::path::PathBuf;

use clap::Args;
use sar_core::Version;

use crate::error::CliError;
use crate::output::Output;
use crate::protocol::{Input, VersionOutput, read_input, write_output};

/// Arguments for the out command.
#[derive(Args)]
pub(crate) struct OutArgs {
    /// Build sources directory (ignored).
    source_dir: Option<PathBuf>,
}

impl OutArgs {
    /// Execute the out command.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is malformed or stdout can't be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        if let Some(dir) = &self.source_dir {
            Output::stderr().ignoring_sources(dir);
        }

        let input = read_input(io::stdin().lock())?;
        let version = passthrough(input);

        write_output(io::stdout().lock(), &VersionOutput { version: &version })
    }
}

/// Version echoed back by `out`.
fn passthrough(input: Input) -> Version {
    input.version.unwrap_or_default()
}
