//! Encoding and decoding of the titles that link Launchpad bugs to mirrors.
//!
//! A mirrored issue's title starts with an `LP#<id>` token followed by a
//! single space and the Launchpad bug title. [`compose_title`] and
//! [`parse_title`] are inverse operations for every numeric bug id.

/// Prefix of the token identifying a Launchpad bug in a mirror title.
pub const TOKEN_PREFIX: &str = "LP#";

/// Separator between the bug reference and the summary in a Launchpad task title.
pub const TASK_TITLE_SEPARATOR: &str = ": ";

/// Builds the token for an upstream bug id.
///
/// Format: "LP#{id}"
#[must_use]
pub fn token(upstream_id: &str) -> String {
    format!("{TOKEN_PREFIX}{upstream_id}")
}

/// Builds the title of a mirrored issue.
///
/// Format: "LP#{id} {title}"
#[must_use]
pub fn compose_title(upstream_id: &str, title: &str) -> String {
    format!("{} {}", token(upstream_id), title)
}

/// A mirror title decoded into its upstream id and bug title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle<'a> {
    /// Launchpad bug id.
    pub upstream_id: &'a str,
    /// Remainder of the title after the token.
    pub title: &'a str,
}

/// Decodes a mirror title produced by [`compose_title`].
///
/// Returns `None` when the title does not start with an `LP#` token or the
/// token carries no numeric id. A token without a trailing summary decodes
/// to an empty title, since GitHub trims trailing whitespace.
#[must_use]
pub fn parse_title(title: &str) -> Option<ParsedTitle<'_>> {
    let rest = title.strip_prefix(TOKEN_PREFIX)?;
    let (upstream_id, title) = match rest.split_once(' ') {
        Some((id, title)) => (id, title),
        None => (rest, ""),
    };

    if !is_bug_id(upstream_id) {
        return None;
    }

    Some(ParsedTitle { upstream_id, title })
}

/// Extracts the bug summary from a Launchpad task title.
///
/// Task titles look like `Bug #12345 in pkg (Ubuntu): "summary"`. Everything
/// after the first `": "` is returned, so separators inside the summary are
/// kept. Returns `None` when the separator is missing.
#[must_use]
pub fn split_task_title(task_title: &str) -> Option<&str> {
    task_title
        .split_once(TASK_TITLE_SEPARATOR)
        .map(|(_, summary)| summary)
}

/// Returns true if the value is a non-empty run of ASCII digits.
#[must_use]
pub fn is_bug_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
