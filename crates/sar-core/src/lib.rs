//! Core of the Slack attachment resource.
//!
//! Tracks one named attachment posted to a channel:
//!
//! - [`VersionResolver`] walks the paginated upload listing and reports every
//!   upload of the attachment as a [`Version`] (the `check` step)
//! - [`FileRetriever`] downloads the content of one version (the `in` step)
//!
//! Both talk to the remote service through the [`FileApi`] trait, so they can
//! be exercised against [`MockFileApi`] (behind the `mock` feature) without
//! network access.
//!
//! # Example
//!
//! ```ignore
//! use sar_core::VersionResolver;
//!
//! let versions = VersionResolver::new(&client).resolve("GA4EU44FJ", "banana.zip", Some("1525000000"))?;
//! for version in versions {
//!     println!("{} @ {}", version.id, version.timestamp);
//! }
//! ```

mod api;
mod check;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod retrieve;
mod types;

pub use api::{ApiError, ApiErrorKind, FIRST_PAGE, FileApi, ListFilesQuery, PAGE_SIZE};
pub use check::{CheckError, VersionResolver};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockFileApi;
pub use retrieve::{FileRetriever, RemoteFetchError, RetrieveError};
pub use types::{PageBatch, RemoteFile, UploadRecord, Version};
