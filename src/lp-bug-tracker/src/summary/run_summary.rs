//! Run summary types.

use crate::reconcile::{SyncAction, SyncPlan};

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of bugs fetched from Launchpad.
    pub upstream_bugs: usize,

    /// Number of mirrored issues found on GitHub.
    pub mirrored_issues: usize,

    /// Number of mirrors created (or planned, in a dry run).
    pub issues_created: usize,

    /// Number of mirrors closed (or planned, in a dry run).
    pub issues_closed: usize,

    /// Number of bugs needing no action.
    pub unchanged: usize,

    /// Number of mirrors whose bug is no longer listed on Launchpad.
    pub orphaned: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Records the counters of a computed plan that do not depend on applying it.
    pub fn record_plan(&mut self, plan: &SyncPlan) {
        self.unchanged = plan.unchanged;
        self.orphaned = plan.orphaned.len();
    }

    /// Updates the summary with an applied action.
    pub fn record_action(&mut self, action: &SyncAction) {
        match action {
            SyncAction::Create { .. } => self.issues_created += 1,
            SyncAction::Close { .. } => self.issues_closed += 1,
        }
    }

    /// Total number of actions applied.
    #[must_use]
    pub fn total_actions(&self) -> usize {
        self.issues_created + self.issues_closed
    }
}
