//! Version discovery.
//!
//! [`VersionResolver`] walks the whole upload listing of a channel, keeps the
//! uploads of one attachment and turns them into [`Version`]s.

use std::num::ParseIntError;

use tracing::{debug, info};

use crate::api::{ApiError, FileApi, ListFilesQuery};
use crate::types::{UploadRecord, Version};

/// Error during version discovery.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The last-seen version timestamp is not a non-negative integer.
    #[error("invalid version timestamp {value:?}: {source}")]
    InvalidTimestamp {
        /// Raw timestamp as received.
        value: String,
        /// Parse failure.
        #[source]
        source: ParseIntError,
    },

    /// The listing API failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Discovers versions of a named attachment.
pub struct VersionResolver<A> {
    api: A,
}

impl<A: FileApi> VersionResolver<A> {
    /// Create a resolver over a listing API.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Find every upload of `filename` in `channel`.
    ///
    /// `since` is the timestamp of the last-seen version. When present and
    /// non-empty it is passed to the listing API as a lower bound; `None` or
    /// `""` fetches the whole history.
    ///
    /// Versions are ordered by comparing their timestamps as strings, so
    /// `"10"` sorts before `"9"`. Pipelines that already recorded versions
    /// depend on this order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidTimestamp`] before any API call if `since`
    /// doesn't parse, or [`CheckError::Api`] as soon as any page fails.
    pub fn resolve(
        &self,
        channel: &str,
        filename: &str,
        since: Option<&str>,
    ) -> Result<Vec<Version>, CheckError> {
        let ts_from = parse_since(since)?;

        let records = self.fetch_all(channel, ts_from)?;
        let scanned = records.len();

        let mut versions: Vec<Version> = records
            .iter()
            .filter(|record| record.name == filename)
            .map(Version::from)
            .collect();
        versions.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        info!(
            "Found {} version(s) of '{}' among {} upload(s) in {}",
            versions.len(),
            filename,
            scanned,
            channel
        );

        Ok(versions)
    }

    /// Fetch pages until a short page marks the end of the listing.
    fn fetch_all(
        &self,
        channel: &str,
        ts_from: Option<u64>,
    ) -> Result<Vec<UploadRecord>, ApiError> {
        let mut query = ListFilesQuery::first_page(channel, ts_from);
        let mut records = Vec::new();

        loop {
            let batch = self.api.list_files(&query)?;
            let page_len = batch.records.len();
            let is_last = page_len < query.count as usize;

            debug!(
                page = query.page,
                records = page_len,
                has_more = batch.has_more,
                "Fetched upload page"
            );
            if is_last && batch.has_more {
                debug!(page = query.page, "Short page reported more results, stopping");
            }

            records.extend(batch.records);

            if is_last {
                return Ok(records);
            }
            query.page += 1;
        }
    }
}

/// Parse the last-seen timestamp. Empty means no lower bound.
fn parse_since(since: Option<&str>) -> Result<Option<u64>, CheckError> {
    match since {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|source| CheckError::InvalidTimestamp {
                value: value.to_owned(),
                source,
            }),
    }
}
