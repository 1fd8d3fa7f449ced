//! Attachment download.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};
use ureq::Agent;

use crate::api::{ApiError, FileApi};

/// Non-success HTTP response while downloading a file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("http error retrieving file from {url}: {status}")]
pub struct RemoteFetchError {
    /// HTTP status line (e.g., "404 Not Found").
    pub status: String,
    /// Requested download URL.
    pub url: String,
}

/// Error while retrieving an attachment.
#[derive(Debug, thiserror::Error)]
pub enum RetrieveError {
    /// Metadata lookup failed.
    #[error("getting file {id}: {source}")]
    Lookup {
        /// Upload id being resolved.
        id: String,
        /// Listing API failure.
        #[source]
        source: ApiError,
    },

    /// The backend returned no download URL for the file.
    #[error("file {id} has no download URL")]
    MissingDownloadUrl {
        /// Upload id being resolved.
        id: String,
    },

    /// The remote file name can't be used as a file name in the output directory.
    #[error("refusing to write file with unsafe name {name:?}")]
    UnsafeFileName {
        /// Name reported by the backend.
        name: String,
    },

    /// The download URL is malformed.
    #[error("invalid download URL {url}: {reason}")]
    InvalidUrl {
        /// Download URL as reported by the backend.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },

    /// HTTP request failed (network error, timeout, etc).
    #[error("downloading file: {0}")]
    Transport(#[from] ureq::Error),

    /// Server answered with an error status.
    #[error(transparent)]
    Remote(#[from] RemoteFetchError),

    /// Writing the downloaded file failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Downloads attachment content into a directory.
pub struct FileRetriever {
    agent: Agent,
}

impl Default for FileRetriever {
    fn default() -> Self {
        Self::new(None)
    }
}

impl FileRetriever {
    /// Create a retriever, optionally with a global request timeout.
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }

    /// Download the upload `id` to `<output_dir>/<remote file name>`.
    ///
    /// The file name comes from the backend, not from the caller. The download
    /// is authorized with `token` as a bearer token.
    ///
    /// If the transfer fails after the file was created, the partial file is
    /// removed before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`RetrieveError::Lookup`] if the metadata lookup fails,
    /// [`RetrieveError::Remote`] on an HTTP error status, and
    /// [`RetrieveError::Io`] with the raw OS error if the file can't be written.
    pub fn retrieve<A: FileApi>(
        &self,
        api: &A,
        id: &str,
        token: &str,
        output_dir: &Path,
    ) -> Result<PathBuf, RetrieveError> {
        let file = api.file_info(id).map_err(|source| RetrieveError::Lookup {
            id: id.to_owned(),
            source,
        })?;

        let name = file.record.name;
        if !is_safe_file_name(&name) {
            return Err(RetrieveError::UnsafeFileName { name });
        }
        let url = file
            .download_url
            .ok_or_else(|| RetrieveError::MissingDownloadUrl { id: id.to_owned() })?;
        validate_url(&url)?;

        info!("Downloading '{}' (id={})", name, id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &format!("Bearer {token}"))
            .call()?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let status_line = format!(
                "{} {}",
                status.as_str(),
                status.canonical_reason().unwrap_or_default()
            );
            return Err(RemoteFetchError {
                status: status_line.trim_end().to_owned(),
                url,
            }
            .into());
        }

        let path = output_dir.join(&name);
        let mut reader = response.into_body().into_reader();
        let mut out = File::create(&path)?;

        match io::copy(&mut reader, &mut out) {
            Ok(bytes) => {
                info!("Wrote {} bytes to {}", bytes, path.display());
                Ok(path)
            }
            Err(err) => {
                drop(out);
                if let Err(cleanup) = fs::remove_file(&path) {
                    warn!("Failed to remove partial file {}: {}", path.display(), cleanup);
                }
                Err(err.into())
            }
        }
    }
}

/// A bare file name: no separators, not empty, not `.` or `..`.
fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

fn validate_url(url: &str) -> Result<(), RetrieveError> {
    let invalid = |reason: String| RetrieveError::InvalidUrl {
        url: url.to_owned(),
        reason,
    };

    let uri: ureq::http::Uri = url.parse().map_err(|e| invalid(format!("{e}")))?;
    match uri.scheme_str() {
        Some("http" | "https") => Ok(()),
        Some(other) => Err(invalid(format!("unsupported scheme {other}"))),
        None => Err(invalid("missing scheme".to_owned())),
    }
}
