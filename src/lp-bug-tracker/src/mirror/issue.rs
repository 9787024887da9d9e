//! Mirrored issue types.

use crate::title::compose_title;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// State of a mirrored issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorStatus {
    Open,
    Closed,
}

impl MirrorStatus {
    /// Parses the state word printed by the issue tracker.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("open") {
            Some(Self::Open)
        } else if value.eq_ignore_ascii_case("closed") {
            Some(Self::Closed)
        } else {
            None
        }
    }

    /// Returns the state as a lowercase word.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for MirrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A GitHub issue mirroring a Launchpad bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirroredIssue {
    /// GitHub issue number.
    pub id: String,

    /// Issue state.
    pub status: MirrorStatus,

    /// Launchpad bug id decoded from the title.
    pub upstream_id: String,

    /// Title remainder after the `LP#` token.
    pub title: String,
}

/// Mirrored issues keyed by Launchpad bug id.
#[derive(Debug, Clone, Default)]
pub struct MirroredIssues {
    by_upstream: HashMap<String, MirroredIssue>,
}

impl MirroredIssues {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an issue. When another issue already mirrors the same bug, the
    /// new one wins and a warning is logged.
    pub fn insert(&mut self, issue: MirroredIssue) {
        let upstream_id = issue.upstream_id.clone();
        let new_id = issue.id.clone();
        if let Some(previous) = self.by_upstream.insert(upstream_id.clone(), issue) {
            warn!(
                upstream_id = %upstream_id,
                kept = %new_id,
                dropped = %previous.id,
                "Launchpad bug is mirrored more than once"
            );
        }
    }

    /// Returns the mirror of a Launchpad bug.
    #[must_use]
    pub fn get(&self, upstream_id: &str) -> Option<&MirroredIssue> {
        self.by_upstream.get(upstream_id)
    }

    /// Number of mirrored bugs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_upstream.len()
    }

    /// Returns true if nothing is mirrored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_upstream.is_empty()
    }

    /// Iterates mirrored issues in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &MirroredIssue> {
        self.by_upstream.values()
    }
}

impl FromIterator<MirroredIssue> for MirroredIssues {
    fn from_iter<I: IntoIterator<Item = MirroredIssue>>(iter: I) -> Self {
        let mut issues = Self::new();
        for issue in iter {
            issues.insert(issue);
        }
        issues
    }
}

/// An issue to open for a Launchpad bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMirror {
    /// Launchpad bug id.
    pub upstream_id: String,

    /// Issue title carrying the `LP#` token.
    pub title: String,

    /// Issue body pointing back to Launchpad.
    pub body: String,
}

impl NewMirror {
    /// Builds the issue for a bug, composing the tokenized title.
    #[must_use]
    pub fn new(upstream_id: &str, summary: &str, body: impl Into<String>) -> Self {
        Self {
            upstream_id: upstream_id.to_string(),
            title: compose_title(upstream_id, summary),
            body: body.into(),
        }
    }
}
