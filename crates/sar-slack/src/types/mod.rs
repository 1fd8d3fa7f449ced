//! Slack Web API response types.

mod file;

pub use file::{File, Paging};
pub(crate) use file::{Envelope, FileInfo, FileList};
