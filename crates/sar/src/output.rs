//! Human-facing status lines.
//!
//! stdout carries the protocol response, so everything here goes to stderr.

use std::io::Write;
use std::path::Path;

use console::{Style, Term};
use sar_core::Version;

use crate::error::CliError;

/// Status reporter for the resource phases.
pub(crate) struct Output<W = Term> {
    out: W,
    done: Style,
    note: Style,
    failure: Style,
}

impl Output {
    /// Reporter writing to stderr, colored when stderr is a terminal.
    pub(crate) fn stderr() -> Self {
        Self {
            out: Term::stderr(),
            done: Style::new().green(),
            note: Style::new().dim(),
            failure: Style::new().red().bold(),
        }
    }
}

impl<W: Write> Output<W> {
    /// `in` finished: the attachment for `version` now lives at `path`.
    pub(crate) fn fetched(&mut self, version: &Version, path: &Path) {
        let line = format!(
            "Fetched {} (uploaded {}) to {}",
            version.id,
            version.timestamp,
            path.display()
        );
        let styled = self.done.apply_to(line).to_string();
        self.emit(&styled);
    }

    /// `out` was handed a sources directory it does not read.
    pub(crate) fn ignoring_sources(&mut self, dir: &Path) {
        let line = format!("Ignoring sources in {}; uploads are not supported", dir.display());
        let styled = self.note.apply_to(line).to_string();
        self.emit(&styled);
    }

    /// A phase failed; the process exits non-zero after this.
    pub(crate) fn failed(&mut self, err: &CliError) {
        let line = format!("Error: {err}");
        let styled = self.failure.apply_to(line).to_string();
        self.emit(&styled);
    }

    fn emit(&mut self, line: &str) {
        // best effort
        let _ = writeln!(self.out, "{line}");
    }
}

#[cfg(test)]
impl Output<Vec<u8>> {
    fn plain() -> Self {
        Self {
            out: Vec::new(),
            done: Style::new(),
            note: Style::new(),
            failure: Style::new(),
        }
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_fetched_names_version_and_path() {
        let mut output = Output::plain();
        let version = Version {
            id: "F123".to_owned(),
            timestamp: "6789".to_owned(),
        };

        output.fetched(&version, Path::new("/tmp/build/banana.zip"));

        assert_eq!(
            output.text(),
            "Fetched F123 (uploaded 6789) to /tmp/build/banana.zip\n"
        );
    }

    #[test]
    fn test_ignoring_sources() {
        let mut output = Output::plain();

        output.ignoring_sources(Path::new("/tmp/src"));

        assert_eq!(
            output.text(),
            "Ignoring sources in /tmp/src; uploads are not supported\n"
        );
    }

    #[test]
    fn test_failed_prefixes_error() {
        let mut output = Output::plain();

        output.failed(&CliError::Validation("version is required for in".to_owned()));

        assert_eq!(output.text(), "Error: version is required for in\n");
    }

    #[test]
    fn test_lines_accumulate_in_order() {
        let mut output = Output::plain();

        output.ignoring_sources(Path::new("a"));
        output.failed(&CliError::Validation("boom".to_owned()));

        assert_eq!(
            output.text(),
            "Ignoring sources in a; uploads are not supported\nError: boom\n"
        );
    }
}
