//! Upstream fetch error types.

use thiserror::Error;

/// Errors that can occur while reading bugs from Launchpad.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP transport error.
    #[error("Launchpad request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Launchpad answered with a non-success status.
    #[error("Launchpad returned {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Response body was not the expected JSON.
    #[error("Failed to decode Launchpad response from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// No published source matches the tracked package.
    #[error("No published source named '{package}' in {distribution}")]
    PackageNotFound {
        distribution: String,
        package: String,
    },

    /// A task title lacks the `": "` separator before the bug summary.
    #[error("Task title of bug {bug_id} has no summary separator: {title}")]
    MalformedTaskTitle { bug_id: String, title: String },

    /// A task's bug link does not end in a numeric bug id.
    #[error("Bug link does not end in a bug id: {link}")]
    MalformedBugLink { link: String },

    /// A URL could not be built or parsed.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
