//! Mock listing API for testing.
//!
//! Provides [`MockFileApi`] for unit testing without network access.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use crate::api::{ApiError, ApiErrorKind, FileApi, ListFilesQuery, PAGE_SIZE};
use crate::types::{PageBatch, RemoteFile, UploadRecord};

/// Scripted reply to one `list_files` call.
#[derive(Debug)]
enum PageReply {
    Records(Vec<UploadRecord>),
    Error(ApiErrorKind, String),
}

/// Mock listing API for testing.
///
/// Pages are served in the order they were added, one per `list_files`
/// call; once exhausted, every further call returns an empty page. All calls
/// are recorded for later inspection.
///
/// # Example
///
/// ```ignore
/// use sar_core::{MockFileApi, UploadRecord, VersionResolver};
///
/// let api = MockFileApi::new()
///     .with_page(vec![UploadRecord::new("F1", "banana.zip", 1234)]);
///
/// let versions = VersionResolver::new(&api).resolve("G1", "banana.zip", None)?;
/// assert_eq!(api.list_calls().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockFileApi {
    pages: RwLock<VecDeque<PageReply>>,
    files: RwLock<HashMap<String, RemoteFile>>,
    info_error: RwLock<Option<(ApiErrorKind, String)>>,
    list_calls: RwLock<Vec<ListFilesQuery>>,
    info_calls: RwLock<Vec<String>>,
}

impl MockFileApi {
    /// Create a new mock with no pages and no files.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a page of records.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, records: Vec<UploadRecord>) -> Self {
        self.pages
            .write()
            .unwrap()
            .push_back(PageReply::Records(records));
        self
    }

    /// Queue a failing page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_list_error(self, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        self.pages
            .write()
            .unwrap()
            .push_back(PageReply::Error(kind, message.into()));
        self
    }

    /// Register a file for `file_info` lookups.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, file: RemoteFile) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(file.record.id.clone(), file);
        self
    }

    /// Make every `file_info` call fail.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_info_error(self, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        *self.info_error.write().unwrap() = Some((kind, message.into()));
        self
    }

    /// Queries received by `list_files`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn list_calls(&self) -> Vec<ListFilesQuery> {
        self.list_calls.read().unwrap().clone()
    }

    /// Ids received by `file_info`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn info_calls(&self) -> Vec<String> {
        self.info_calls.read().unwrap().clone()
    }
}

impl FileApi for MockFileApi {
    fn list_files(&self, query: &ListFilesQuery) -> Result<PageBatch, ApiError> {
        self.list_calls.write().unwrap().push(query.clone());

        match self.pages.write().unwrap().pop_front() {
            Some(PageReply::Records(records)) => {
                let has_more = records.len() >= PAGE_SIZE as usize;
                Ok(PageBatch { records, has_more })
            }
            Some(PageReply::Error(kind, message)) => Err(ApiError::new(kind)
                .with_backend("Mock")
                .with_message(message)),
            None => Ok(PageBatch::default()),
        }
    }

    fn file_info(&self, id: &str) -> Result<RemoteFile, ApiError> {
        self.info_calls.write().unwrap().push(id.to_owned());

        if let Some((kind, message)) = self.info_error.read().unwrap().as_ref() {
            return Err(ApiError::new(*kind)
                .with_backend("Mock")
                .with_message(message.clone()));
        }

        self.files.read().unwrap().get(id).cloned().ok_or_else(|| {
            ApiError::new(ApiErrorKind::NotFound)
                .with_backend("Mock")
                .with_message(format!("file {id}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_pages_served_in_order_then_empty() {
        let api = MockFileApi::new()
            .with_page(vec![UploadRecord::new("a", "x", 1)])
            .with_page(vec![UploadRecord::new("b", "x", 2)]);
        let query = ListFilesQuery::first_page("G1", None);

        assert_eq!(api.list_files(&query).unwrap().records[0].id, "a");
        assert_eq!(api.list_files(&query).unwrap().records[0].id, "b");
        assert_eq!(api.list_files(&query).unwrap(), PageBatch::default());
        assert_eq!(api.list_calls().len(), 3);
    }

    #[test]
    fn test_list_error() {
        let api = MockFileApi::new().with_list_error(ApiErrorKind::Other, "some-error");

        let err = api
            .list_files(&ListFilesQuery::first_page("G1", None))
            .unwrap_err();
        assert_eq!(err.to_string(), "[Mock] Error: some-error");
    }

    #[test]
    fn test_file_info_unknown_id() {
        let api = MockFileApi::new();

        let err = api.file_info("F404").unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NotFound);
        assert_eq!(api.info_calls(), vec!["F404".to_owned()]);
    }
}
