//! Remote file listing abstraction.
//!
//! Provides the [`FileApi`] trait that [`VersionResolver`](crate::VersionResolver)
//! and [`FileRetriever`](crate::FileRetriever) talk to, along with
//! [`ApiError`] for unified error handling across backends.

use crate::types::{PageBatch, RemoteFile};

/// Fixed number of records requested per page.
pub const PAGE_SIZE: u32 = 100;

/// Page numbers start at one.
pub const FIRST_PAGE: u32 = 1;

/// Parameters of one `list_files` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilesQuery {
    /// Channel to list uploads from.
    pub channel: String,
    /// Only uploads created at or after this Unix timestamp.
    /// `None` and `Some(0)` both mean no lower bound.
    pub ts_from: Option<u64>,
    /// Only uploads created at or before this Unix timestamp. `None` is unbounded.
    pub ts_to: Option<u64>,
    /// 1-based page number.
    pub page: u32,
    /// Records per page.
    pub count: u32,
}

impl ListFilesQuery {
    /// First-page query over a channel with the fixed page size.
    #[must_use]
    pub fn first_page(channel: impl Into<String>, ts_from: Option<u64>) -> Self {
        Self {
            channel: channel.into(),
            ts_from,
            ts_to: None,
            page: FIRST_PAGE,
            count: PAGE_SIZE,
        }
    }
}

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiErrorKind {
    /// File or channel does not exist.
    NotFound,
    /// Token missing, invalid or lacking scope.
    Unauthorized,
    /// Too many requests.
    RateLimited,
    /// Remote service could not be reached.
    Unavailable,
    /// Response could not be understood.
    InvalidResponse,
    /// Other/unknown error category.
    Other,
}

impl ApiErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "Not found",
            Self::Unauthorized => "Unauthorized",
            Self::RateLimited => "Rate limited",
            Self::Unavailable => "Unavailable",
            Self::InvalidResponse => "Invalid response",
            Self::Other => "Error",
        }
    }
}

/// Listing API error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct ApiError {
    /// Semantic error category.
    pub kind: ApiErrorKind,
    /// Backend identifier (e.g., "Slack", "Mock").
    pub backend: Option<&'static str>,
    message: Option<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ApiError {
    /// Create a new API error.
    #[must_use]
    pub fn new(kind: ApiErrorKind) -> Self {
        Self {
            kind,
            backend: None,
            message: None,
            source: None,
        }
    }

    /// Attach a human-readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        write!(f, "{}", self.kind.as_str())?;

        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        } else if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Remote listing capability over a channel's file uploads.
///
/// # Paging contract
///
/// `list_files` must return exactly `query.count` records for every page
/// except the last one, which holds fewer (possibly zero). Callers detect the
/// end of the listing from a short page; the [`PageBatch::has_more`] hint is
/// informational only.
pub trait FileApi {
    /// Fetch one page of uploads.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend rejects it.
    fn list_files(&self, query: &ListFilesQuery) -> Result<PageBatch, ApiError>;

    /// Look up one upload, including its private download URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the file doesn't exist or the request fails.
    fn file_info(&self, id: &str) -> Result<RemoteFile, ApiError>;
}

impl<T: FileApi + ?Sized> FileApi for &T {
    fn list_files(&self, query: &ListFilesQuery) -> Result<PageBatch, ApiError> {
        (**self).list_files(query)
    }

    fn file_info(&self, id: &str) -> Result<RemoteFile, ApiError> {
        (**self).file_info(id)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_first_page_query() {
        let query = ListFilesQuery::first_page("G1", Some(42));

        assert_eq!(
            query,
            ListFilesQuery {
                channel: "G1".to_owned(),
                ts_from: Some(42),
                ts_to: None,
                page: 1,
                count: 100,
            }
        );
    }

    #[test]
    fn test_api_error_display_with_message() {
        let err = ApiError::new(ApiErrorKind::NotFound)
            .with_backend("Slack")
            .with_message("file_not_found");

        assert_eq!(err.to_string(), "[Slack] Not found: file_not_found");
    }

    #[test]
    fn test_api_error_display_falls_back_to_source() {
        let io = std::io::Error::other("connection reset");
        let err = ApiError::new(ApiErrorKind::Unavailable).with_source(io);

        assert_eq!(err.to_string(), "Unavailable: connection reset");
        assert!(err.source().is_some());
        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_api_error_display_kind_only() {
        let err = ApiError::new(ApiErrorKind::RateLimited);

        assert_eq!(err.to_string(), "Rate limited");
        assert!(err.source().is_none());
    }
}
