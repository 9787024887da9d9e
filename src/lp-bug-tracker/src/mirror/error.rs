//! Mirror error types.

use thiserror::Error;

/// Errors that can occur while reading or changing mirrored issues.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The issue-tracking CLI could not be started.
    #[error("Failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The issue-tracking CLI exited unsuccessfully.
    #[error("{command} failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// A line of the issue listing could not be understood.
    #[error("Malformed issue line '{line}': {message}")]
    MalformedLine { line: String, message: String },

    /// An issue id is not a GitHub issue number.
    #[error("Invalid issue number: {id}")]
    InvalidIssueId { id: String },

    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHub(#[from] octocrab::Error),
}
