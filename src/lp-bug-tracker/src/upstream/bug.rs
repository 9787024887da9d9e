//! Launchpad bug records.

use super::BugStatus;
use std::collections::HashMap;
use url::Url;

/// A bug read from Launchpad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamBug {
    /// Launchpad bug id.
    pub id: String,

    /// Bug summary, without the task prefix.
    pub title: String,

    /// Task status.
    pub status: BugStatus,

    /// Whether the status is terminal.
    pub closed: bool,

    /// Link to the bug on the Launchpad website.
    pub link: Url,
}

impl UpstreamBug {
    /// Creates a bug record, deriving `closed` from the status.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, status: BugStatus, link: Url) -> Self {
        let closed = status.is_closed();
        Self {
            id: id.into(),
            title: title.into(),
            status,
            closed,
            link,
        }
    }
}

/// Bugs keyed by id, iterated in the order they were fetched.
#[derive(Debug, Clone, Default)]
pub struct UpstreamBugs {
    bugs: Vec<UpstreamBug>,
    index: HashMap<String, usize>,
}

impl UpstreamBugs {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a bug. A bug with an id already present replaces the old
    /// record in place and the old record is returned.
    pub fn insert(&mut self, bug: UpstreamBug) -> Option<UpstreamBug> {
        match self.index.get(&bug.id) {
            Some(&position) => Some(std::mem::replace(&mut self.bugs[position], bug)),
            None => {
                self.index.insert(bug.id.clone(), self.bugs.len());
                self.bugs.push(bug);
                None
            }
        }
    }

    /// Returns the bug with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&UpstreamBug> {
        self.index.get(id).map(|&position| &self.bugs[position])
    }

    /// Returns true if a bug with the given id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of bugs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bugs.len()
    }

    /// Returns true if there are no bugs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bugs.is_empty()
    }

    /// Iterates bugs in fetch order.
    pub fn iter(&self) -> std::slice::Iter<'_, UpstreamBug> {
        self.bugs.iter()
    }
}

impl FromIterator<UpstreamBug> for UpstreamBugs {
    fn from_iter<I: IntoIterator<Item = UpstreamBug>>(iter: I) -> Self {
        let mut bugs = Self::new();
        for bug in iter {
            bugs.insert(bug);
        }
        bugs
    }
}

impl<'a> IntoIterator for &'a UpstreamBugs {
    type Item = &'a UpstreamBug;
    type IntoIter = std::slice::Iter<'a, UpstreamBug>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
