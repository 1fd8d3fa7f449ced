//! `sar in` command implementation.

use std::io;
use std::path::{Path, PathBuf};

use clap::Args;
use sar_config::{SlackSettings, Source};
use sar_core::{FileApi, FileRetriever, Version};
use sar_slack::SlackClient;
use tracing::debug;

use crate::error::CliError;
use crate::output::Output;
use crate::protocol::{VersionOutput, read_input, write_output};

/// Arguments for the in command.
#[derive(Args)]
pub(crate) struct InArgs {
    /// Directory to download the attachment into.
    destination: PathBuf,
}

impl InArgs {
    /// Execute the in command.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is malformed or the download fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let input = read_input(io::stdin().lock())?;
        let source = input.source.resolve()?;
        let version = require_version(input.version)?;
        let settings = SlackSettings::from_env()?;

        debug!("Using Slack API at {}", settings.api_url);
        let client = SlackClient::from_config(&settings, &source.token);
        let retriever = FileRetriever::new(settings.timeout);
        let path = fetch(&retriever, &client, &source, &version, &self.destination)?;
        Output::stderr().fetched(&version, &path);

        write_output(io::stdout().lock(), &VersionOutput { version: &version })
    }
}

fn require_version(version: Option<Version>) -> Result<Version, CliError> {
    version.ok_or_else(|| CliError::Validation("version is required for in".to_owned()))
}

/// Download the file behind `version` into `destination`.
fn fetch<A: FileApi>(
    retriever: &FileRetriever,
    api: &A,
    source: &Source,
    version: &Version,
    destination: &Path,
) -> Result<PathBuf, CliError> {
    let path = retriever.retrieve(api, &version.id, &source.token, destination)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use sar_core::{ApiErrorKind, MockFileApi};

    use super::*;

    #[test]
    fn test_require_version_missing() {
        let err = require_version(None).unwrap_err();

        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_fetch_lookup_error_is_wrapped() {
        let api = MockFileApi::new().with_info_error(ApiErrorKind::NotFound, "file_not_found");
        let source = Source {
            token: "xoxp-1".to_owned(),
            ..Default::default()
        };
        let version = Version {
            id: "F404".to_owned(),
            timestamp: "1".to_owned(),
        };

        let err = fetch(
            &FileRetriever::default(),
            &api,
            &source,
            &version,
            Path::new("."),
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "running in with slack client: getting file F404: [Mock] Not found: file_not_found"
        );
        assert_eq!(api.info_calls(), vec!["F404".to_owned()]);
    }
}
