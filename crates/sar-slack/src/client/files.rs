//! File operations for Slack API.

use tracing::info;

use sar_core::{ApiError, FileApi, ListFilesQuery, PageBatch, RemoteFile};

use super::SlackClient;
use crate::error::SlackError;
use crate::types::{FileInfo, FileList};

impl SlackClient {
    /// List one page of files shared in a channel.
    ///
    /// A zero `ts_from` is not sent, so it means "no lower bound" just like `None`.
    pub(crate) fn list_files_page(&self, query: &ListFilesQuery) -> Result<FileList, SlackError> {
        let mut params = vec![("channel", query.channel.clone())];
        if let Some(ts_from) = query.ts_from.filter(|ts| *ts > 0) {
            params.push(("ts_from", ts_from.to_string()));
        }
        if let Some(ts_to) = query.ts_to {
            params.push(("ts_to", ts_to.to_string()));
        }
        params.push(("page", query.page.to_string()));
        params.push(("count", query.count.to_string()));

        info!("Listing files in {} (page {})", query.channel, query.page);

        self.get("files.list", &params)
    }

    /// Get a single file, including its download URL.
    pub(crate) fn get_file(&self, id: &str) -> Result<RemoteFile, SlackError> {
        info!("Getting file {}", id);

        let info: FileInfo = self.get("files.info", &[("file", id.to_owned())])?;
        info.file.map(RemoteFile::from).ok_or(SlackError::MissingField {
            method: "files.info",
            field: "file",
        })
    }
}

impl FileApi for SlackClient {
    fn list_files(&self, query: &ListFilesQuery) -> Result<PageBatch, ApiError> {
        let list = self.list_files_page(query)?;
        let has_more = list.paging.as_ref().is_some_and(|p| p.has_more());

        Ok(PageBatch {
            records: list.files.into_iter().map(Into::into).collect(),
            has_more,
        })
    }

    fn file_info(&self, id: &str) -> Result<RemoteFile, ApiError> {
        self.get_file(id).map_err(Into::into)
    }
}
