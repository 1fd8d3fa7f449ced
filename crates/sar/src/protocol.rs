//! JSON request/response framing on stdin and stdout.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use sar_config::Source;
use sar_core::Version;

use crate::error::CliError;

/// Request passed to every command on stdin.
#[derive(Debug, Deserialize)]
pub(crate) struct Input {
    /// Resource configuration.
    pub source: Source,
    /// Last-seen version (`check`) or the version to act on (`in`, `out`).
    /// Absent or `null` on the first `check`.
    #[serde(default)]
    pub version: Option<Version>,
}

/// Response of `in` and `out`.
#[derive(Debug, Serialize)]
pub(crate) struct VersionOutput<'a> {
    pub version: &'a Version,
}

/// Read one JSON request.
pub(crate) fn read_input<R: Read>(reader: R) -> Result<Input, CliError> {
    serde_json::from_reader(reader).map_err(CliError::ReadInput)
}

/// Write one JSON response followed by a newline.
pub(crate) fn write_output<W: Write, T: Serialize + ?Sized>(
    mut writer: W,
    value: &T,
) -> Result<(), CliError> {
    serde_json::to_writer(&mut writer, value).map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_read_input_full() {
        let json = r#"{
            "source": {"token": "xoxp-1", "groupID": "GA4EU44FJ", "filename": "banana.zip"},
            "version": {"id": "F1", "timestamp": "1525000000"}
        }"#;

        let input = read_input(json.as_bytes()).unwrap();

        assert_eq!(input.source.group_id, "GA4EU44FJ");
        assert_eq!(input.source.filename, "banana.zip");
        assert_eq!(
            input.version,
            Some(Version {
                id: "F1".to_owned(),
                timestamp: "1525000000".to_owned(),
            })
        );
    }

    #[test]
    fn test_read_input_without_version() {
        let json = r#"{"source": {"token": "t", "groupID": "G", "filename": "f"}}"#;

        let input = read_input(json.as_bytes()).unwrap();

        assert_eq!(input.version, None);
    }

    #[test]
    fn test_read_input_null_version() {
        let json = r#"{"source": {"token": "t"}, "version": null}"#;

        let input = read_input(json.as_bytes()).unwrap();

        assert_eq!(input.version, None);
    }

    #[test]
    fn test_read_input_malformed() {
        let err = read_input("not json".as_bytes()).unwrap_err();

        assert!(matches!(err, CliError::ReadInput(_)));
        assert!(err.to_string().starts_with("reading input from stdin:"));
    }

    #[test]
    fn test_write_output_versions() {
        let versions = vec![
            Version {
                id: "c".to_owned(),
                timestamp: "1234".to_owned(),
            },
            Version {
                id: "a".to_owned(),
                timestamp: "3456".to_owned(),
            },
        ];
        let mut buf = Vec::new();

        write_output(&mut buf, &versions).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "[{\"id\":\"c\",\"timestamp\":\"1234\"},{\"id\":\"a\",\"timestamp\":\"3456\"}]\n"
        );
    }

    #[test]
    fn test_write_output_empty_versions_is_array() {
        let mut buf = Vec::new();

        write_output(&mut buf, &Vec::<Version>::new()).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "[]\n");
    }

    #[test]
    fn test_write_output_version_object() {
        let version = Version {
            id: "12345".to_owned(),
            timestamp: "6789".to_owned(),
        };
        let mut buf = Vec::new();

        write_output(&mut buf, &VersionOutput { version: &version }).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{\"version\":{\"id\":\"12345\",\"timestamp\":\"6789\"}}\n"
        );
    }
}
