//! `sar check` command implementation.

use std::io;

use sar_config::{SlackSettings, Source};
use sar_core::{FileApi, Version, VersionResolver};
use sar_slack::SlackClient;
use tracing::debug;

use crate::error::CliError;
use crate::protocol::{read_input, write_output};

/// Execute the check command.
///
/// # Errors
///
/// Returns an error if the request is malformed or version discovery fails.
pub(crate) fn execute() -> Result<(), CliError> {
    let input = read_input(io::stdin().lock())?;
    let source = input.source.resolve()?;
    let settings = SlackSettings::from_env()?;

    debug!("Using Slack API at {}", settings.api_url);
    let client = SlackClient::from_config(&settings, &source.token);
    let versions = check(&client, &source, input.version.as_ref())?;

    write_output(io::stdout().lock(), &versions)
}

/// Discover versions of the configured attachment newer than `version`.
fn check<A: FileApi>(
    api: &A,
    source: &Source,
    version: Option<&Version>,
) -> Result<Vec<Version>, CliError> {
    let since = version.map(|v| v.timestamp.as_str());
    let versions = VersionResolver::new(api).resolve(&source.group_id, &source.filename, since)?;
    Ok(versions)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sar_core::{MockFileApi, UploadRecord};

    use super::*;

    fn source() -> Source {
        Source {
            token: "xoxp-1".to_owned(),
            group_id: "some-group-id".to_owned(),
            filename: "our-file".to_owned(),
        }
    }

    #[test]
    fn test_check_first_run_without_version() {
        let api = MockFileApi::new().with_page(vec![
            UploadRecord::new("a", "our-file", 3456),
            UploadRecord::new("b", "not-file", 2345),
            UploadRecord::new("c", "our-file", 1234),
        ]);

        let versions = check(&api, &source(), None).unwrap();

        assert_eq!(
            versions,
            vec![
                Version {
                    id: "c".to_owned(),
                    timestamp: "1234".to_owned(),
                },
                Version {
                    id: "a".to_owned(),
                    timestamp: "3456".to_owned(),
                },
            ]
        );
        assert_eq!(api.list_calls()[0].ts_from, None);
    }

    #[test]
    fn test_check_passes_version_timestamp_as_lower_bound() {
        let api = MockFileApi::new();
        let version = Version {
            id: "a".to_owned(),
            timestamp: "3456".to_owned(),
        };

        check(&api, &source(), Some(&version)).unwrap();

        let calls = api.list_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].channel, "some-group-id");
        assert_eq!(calls[0].ts_from, Some(3456));
    }

    #[test]
    fn test_check_malformed_version_timestamp() {
        let api = MockFileApi::new();
        let version = Version {
            id: "a".to_owned(),
            timestamp: "abc".to_owned(),
        };

        let err = check(&api, &source(), Some(&version)).unwrap_err();

        assert!(matches!(err, CliError::Check(_)));
        assert!(err.to_string().starts_with("running check with slack client:"));
        assert!(api.list_calls().is_empty());
    }
}
