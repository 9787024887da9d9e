//! Launchpad bug source.
//!
//! This module reads the bug tasks of the tracked source package and turns
//! them into [`UpstreamBug`] records keyed by bug id.

mod bug;
mod cache;
mod error;
pub mod launchpad;
mod status;

pub use bug::{UpstreamBug, UpstreamBugs};
pub use cache::{CachedResponse, ResponseCache};
pub use error::UpstreamError;
pub use launchpad::LaunchpadClient;
pub use status::{BugStatus, SEARCHED_STATUSES};

use async_trait::async_trait;

/// A read-only source of upstream bugs.
#[async_trait]
pub trait UpstreamBugSource: Send + Sync {
    /// Fetches every bug of the tracked package, open and closed, in tracker order.
    async fn fetch_bugs(&self) -> Result<UpstreamBugs, UpstreamError>;
}
