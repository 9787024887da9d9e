//! GitHub issues mirroring Launchpad bugs.
//!
//! Mirrors are found through the `LP#<id>` token at the start of their
//! title. Two backends implement [`IssueMirror`]: the `hub` command-line
//! client and the GitHub REST API.

mod error;
pub mod github;
pub mod hub;
mod issue;

pub use error::MirrorError;
pub use github::GitHubApiMirror;
pub use hub::HubCli;
pub use issue::{MirrorStatus, MirroredIssue, MirroredIssues, NewMirror};

use crate::title::{is_bug_id, parse_title};
use async_trait::async_trait;
use tracing::debug;

/// A destination issue tracker holding mirrors of Launchpad bugs.
#[async_trait]
pub trait IssueMirror: Send + Sync {
    /// Lists every labelled mirror, open and closed, keyed by Launchpad bug id.
    async fn fetch_issues(&self) -> Result<MirroredIssues, MirrorError>;

    /// Opens a new mirror.
    async fn create_issue(&self, issue: &NewMirror) -> Result<(), MirrorError>;

    /// Posts a comment on a mirror.
    async fn comment_issue(&self, issue_id: &str, body: &str) -> Result<(), MirrorError>;

    /// Closes a mirror.
    async fn close_issue(&self, issue_id: &str) -> Result<(), MirrorError>;

    /// Describes what [`IssueMirror::create_issue`] would do, for dry runs.
    fn describe_create(&self, issue: &NewMirror) -> String {
        format!("create issue {:?} with body {:?}", issue.title, issue.body)
    }

    /// Describes what [`IssueMirror::comment_issue`] would do, for dry runs.
    fn describe_comment(&self, issue_id: &str, body: &str) -> String {
        format!("comment on issue #{issue_id}: {body:?}")
    }

    /// Describes what [`IssueMirror::close_issue`] would do, for dry runs.
    fn describe_close(&self, issue_id: &str) -> String {
        format!("close issue #{issue_id}")
    }
}

/// Parses one line of `%I %S %t` issue listing output.
///
/// Returns `Ok(None)` for lines that are not mirrors: blank or short lines,
/// and titles that do not start with an `LP#<id>` token.
///
/// # Errors
///
/// Returns [`MirrorError::MalformedLine`] if a mirror line carries an
/// unknown state or a non-numeric issue number.
pub fn parse_issue_line(line: &str) -> Result<Option<MirroredIssue>, MirrorError> {
    let line = line.trim();
    let mut fields = line.splitn(3, ' ');
    let (Some(id), Some(status), Some(title)) = (fields.next(), fields.next(), fields.next())
    else {
        return Ok(None);
    };

    let Some(parsed) = parse_title(title) else {
        debug!(line, "Skipping issue without LP# token");
        return Ok(None);
    };

    let malformed = |message: &str| MirrorError::MalformedLine {
        line: line.to_string(),
        message: message.to_string(),
    };

    if !is_bug_id(id) {
        return Err(malformed("issue number is not numeric"));
    }
    let status = MirrorStatus::parse(status).ok_or_else(|| malformed("unknown issue state"))?;

    Ok(Some(MirroredIssue {
        id: id.to_string(),
        status,
        upstream_id: parsed.upstream_id.to_string(),
        title: parsed.title.to_string(),
    }))
}

/// Parses the complete issue listing printed by the issue-tracking CLI.
///
/// # Errors
///
/// Returns the first [`MirrorError::MalformedLine`] encountered.
pub fn parse_issue_list(output: &str) -> Result<MirroredIssues, MirrorError> {
    let mut issues = MirroredIssues::new();
    for line in output.lines() {
        if let Some(issue) = parse_issue_line(line)? {
            issues.insert(issue);
        }
    }
    Ok(issues)
}
