//! Planned sync actions.

use url::Url;

/// A single change to apply to the mirror tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Open a mirror for an open Launchpad bug that has none.
    Create {
        /// Launchpad bug id.
        upstream_id: String,
        /// Launchpad bug summary.
        title: String,
        /// Launchpad bug link.
        link: Url,
    },

    /// Close the open mirror of a closed Launchpad bug.
    Close {
        /// Launchpad bug id.
        upstream_id: String,
        /// GitHub issue number of the mirror.
        issue_id: String,
        /// Final Launchpad status text.
        status: String,
    },
}

impl SyncAction {
    /// Returns the Launchpad bug id the action is about.
    #[must_use]
    pub fn upstream_id(&self) -> &str {
        match self {
            Self::Create { upstream_id, .. } | Self::Close { upstream_id, .. } => upstream_id,
        }
    }
}

/// Outcome of comparing Launchpad bugs with their mirrors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Actions in Launchpad fetch order, at most one per bug.
    pub actions: Vec<SyncAction>,

    /// Bugs needing no action.
    pub unchanged: usize,

    /// Ids of mirrored bugs missing from the Launchpad listing, sorted.
    pub orphaned: Vec<String>,
}

impl SyncPlan {
    /// Returns true if nothing has to change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_actions_expose_the_bug_id() {
        let create = SyncAction::Create {
            upstream_id: "100".to_string(),
            title: "greeter crashes".to_string(),
            link: Url::parse("https://bugs.launchpad.net/bugs/100").unwrap(),
        };
        let close = SyncAction::Close {
            upstream_id: "200".to_string(),
            issue_id: "7".to_string(),
            status: "Invalid".to_string(),
        };

        assert_eq!(create.upstream_id(), "100");
        assert_eq!(close.upstream_id(), "200");
    }
}
