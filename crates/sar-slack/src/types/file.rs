//! Slack file types.

use serde::Deserialize;

use sar_core::{RemoteFile, UploadRecord};

/// Slack file object.
///
/// Only includes fields that are actually used.
/// Serde ignores unknown fields from the API response.
#[derive(Debug, Clone, Deserialize)]
pub struct File {
    /// File ID.
    pub id: String,
    /// Filename as uploaded.
    #[serde(default)]
    pub name: String,
    /// Upload time as Unix seconds.
    #[serde(default)]
    pub created: u64,
    /// Authenticated download URL.
    #[serde(default)]
    pub url_private_download: Option<String>,
}

impl From<File> for UploadRecord {
    fn from(file: File) -> Self {
        Self::new(file.id, file.name, file.created)
    }
}

impl From<File> for RemoteFile {
    fn from(mut file: File) -> Self {
        let download_url = file.url_private_download.take();
        Self {
            record: file.into(),
            download_url,
        }
    }
}

/// Paging block of list responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    /// Requested page size.
    #[serde(default)]
    pub count: u32,
    /// Total number of matching files.
    #[serde(default)]
    pub total: u32,
    /// Current page (1-based).
    #[serde(default)]
    pub page: u32,
    /// Number of pages.
    #[serde(default)]
    pub pages: u32,
}

impl Paging {
    /// Whether pages after the current one exist.
    pub fn has_more(&self) -> bool {
        self.page < self.pages
    }
}

/// Common Slack response envelope.
///
/// Every method answers `{"ok": true, ...}` or `{"ok": false, "error": "code"}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub body: T,
}

/// `files.list` payload.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FileList {
    #[serde(default)]
    pub files: Vec<File>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

/// `files.info` payload.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FileInfo {
    #[serde(default)]
    pub file: Option<File>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_file_list_envelope() {
        let json = r#"{
            "ok": true,
            "files": [
                {"id": "F1", "name": "banana.zip", "created": 1525000000, "size": 12, "mimetype": "application/zip"}
            ],
            "paging": {"count": 100, "total": 1, "page": 1, "pages": 1}
        }"#;

        let envelope: Envelope<FileList> = serde_json::from_str(json).unwrap();

        assert!(envelope.ok);
        assert_eq!(envelope.body.files.len(), 1);
        assert_eq!(envelope.body.files[0].name, "banana.zip");
        assert_eq!(envelope.body.files[0].created, 1_525_000_000);
        assert!(!envelope.body.paging.unwrap().has_more());
    }

    #[test]
    fn test_error_envelope() {
        let envelope: Envelope<FileList> =
            serde_json::from_str(r#"{"ok": false, "error": "invalid_auth"}"#).unwrap();

        assert!(!envelope.ok);
        assert_eq!(envelope.error.as_deref(), Some("invalid_auth"));
        assert!(envelope.body.files.is_empty());
    }

    #[test]
    fn test_paging_has_more() {
        let paging = Paging {
            count: 100,
            total: 250,
            page: 2,
            pages: 3,
        };

        assert!(paging.has_more());
    }

    #[test]
    fn test_remote_file_from_file() {
        let file = File {
            id: "F1".to_owned(),
            name: "banana.zip".to_owned(),
            created: 6789,
            url_private_download: Some("https://files.slack.com/banana.zip".to_owned()),
        };

        let remote = RemoteFile::from(file);

        assert_eq!(remote.record, UploadRecord::new("F1", "banana.zip", 6789));
        assert_eq!(
            remote.download_url.as_deref(),
            Some("https://files.slack.com/banana.zip")
        );
    }
}
