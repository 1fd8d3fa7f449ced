//! Slack Web API client.
//!
//! [`SlackClient`] implements [`sar_core::FileApi`] on top of the
//! `files.list` and `files.info` methods.

mod client;
mod error;
mod types;

pub use client::SlackClient;
pub use error::SlackError;
pub use types::{File, Paging};
