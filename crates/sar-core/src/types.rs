//! Attachment and version types.

use serde::{Deserialize, Serialize};

/// One attachment upload as reported by the listing API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    /// Stable upload identifier.
    pub id: String,
    /// Attachment filename.
    pub name: String,
    /// Creation time as Unix seconds.
    pub created_at: u64,
}

impl UploadRecord {
    /// Create a new upload record.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, created_at: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at,
        }
    }
}

/// Upload metadata resolved by id, including where to download it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Upload metadata.
    pub record: UploadRecord,
    /// Authenticated download URL, if the backend exposes one.
    pub download_url: Option<String>,
}

/// One page of uploads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageBatch {
    /// Records on this page, in backend order.
    pub records: Vec<UploadRecord>,
    /// Backend hint that further pages exist.
    pub has_more: bool,
}

/// A discovered version of the tracked attachment.
///
/// Serialized as `{"id": "...", "timestamp": "..."}`. The timestamp is the
/// decimal form of the upload's creation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Version {
    /// Upload identifier, used to fetch the content later.
    #[serde(default)]
    pub id: String,
    /// Creation time as a decimal string.
    #[serde(default)]
    pub timestamp: String,
}

impl From<&UploadRecord> for Version {
    fn from(record: &UploadRecord) -> Self {
        Self {
            id: record.id.clone(),
            timestamp: record.created_at.to_string(),
        }
    }
}
