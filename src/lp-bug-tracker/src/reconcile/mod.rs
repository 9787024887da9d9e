//! Reconciliation of Launchpad bugs with their GitHub mirrors.
//!
//! [`plan`] is a pure comparison of the two listings; [`apply_action`]
//! carries out one planned action against an [`IssueMirror`].
//!
//! Per bug, a mirror moves through `no mirror -> open -> closed` and never
//! back. Mirrors whose bug vanished from Launchpad are left alone.
//!
//! [`IssueMirror`]: crate::mirror::IssueMirror

mod action;
mod apply;
mod error;

pub use action::{SyncAction, SyncPlan};
pub use apply::{apply_action, close_mirror, create_mirror, ApplyContext};
pub use error::ApplyError;

use crate::mirror::{MirrorStatus, MirroredIssues};
use crate::upstream::UpstreamBugs;

/// Computes the actions bringing the mirrors in line with Launchpad.
///
/// For each bug, in fetch order:
/// - mirrored, closed upstream, mirror not closed: close the mirror
/// - not mirrored and open upstream: create a mirror
/// - anything else: no action
#[must_use]
pub fn plan(upstream: &UpstreamBugs, mirrors: &MirroredIssues) -> SyncPlan {
    let mut plan = SyncPlan::default();

    for bug in upstream {
        match mirrors.get(&bug.id) {
            Some(mirror) if bug.closed && mirror.status != MirrorStatus::Closed => {
                plan.actions.push(SyncAction::Close {
                    upstream_id: bug.id.clone(),
                    issue_id: mirror.id.clone(),
                    status: bug.status.to_string(),
                });
            }
            None if !bug.closed => {
                plan.actions.push(SyncAction::Create {
                    upstream_id: bug.id.clone(),
                    title: bug.title.clone(),
                    link: bug.link.clone(),
                });
            }
            _ => plan.unchanged += 1,
        }
    }

    plan.orphaned = mirrors
        .iter()
        .filter(|mirror| !upstream.contains(&mirror.upstream_id))
        .map(|mirror| mirror.upstream_id.clone())
        .collect();
    plan.orphaned.sort();

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::MirroredIssue;
    use crate::upstream::{BugStatus, UpstreamBug};
    use url::Url;

    fn bug(id: &str, status: BugStatus) -> UpstreamBug {
        let link = Url::parse(&format!(
            "https://bugs.launchpad.net/ubuntu/+source/lightdm-gtk-greeter/+bug/{id}"
        ))
        .unwrap();
        UpstreamBug::new(id, format!("summary {id}"), status, link)
    }

    fn mirror(id: &str, upstream_id: &str, status: MirrorStatus) -> MirroredIssue {
        MirroredIssue {
            id: id.to_string(),
            status,
            upstream_id: upstream_id.to_string(),
            title: format!("summary {upstream_id}"),
        }
    }

    #[test]
    fn creates_mirror_for_open_bug() {
        let upstream: UpstreamBugs = [bug("100", BugStatus::New)].into_iter().collect();

        let plan = plan(&upstream, &MirroredIssues::new());

        assert_eq!(plan.actions.len(), 1);
        assert!(matches!(
            &plan.actions[0],
            SyncAction::Create { upstream_id, title, .. }
                if upstream_id == "100" && title == "summary 100"
        ));
    }

    #[test]
    fn closes_open_mirror_of_closed_bug() {
        let upstream: UpstreamBugs = [bug("100", BugStatus::FixReleased)].into_iter().collect();
        let mirrors: MirroredIssues = [mirror("7", "100", MirrorStatus::Open)].into_iter().collect();

        let plan = plan(&upstream, &mirrors);

        assert_eq!(
            plan.actions,
            [SyncAction::Close {
                upstream_id: "100".to_string(),
                issue_id: "7".to_string(),
                status: "Fix Released".to_string(),
            }]
        );
    }

    #[test]
    fn never_creates_mirror_for_closed_bug() {
        let upstream: UpstreamBugs = [bug("1", BugStatus::Expired), bug("2", BugStatus::Invalid)]
            .into_iter()
            .collect();

        let plan = plan(&upstream, &MirroredIssues::new());

        assert!(plan.is_empty());
        assert_eq!(plan.unchanged, 2);
    }

    #[test]
    fn leaves_closed_mirrors_and_open_pairs_alone() {
        let upstream: UpstreamBugs = [bug("1", BugStatus::WontFix), bug("2", BugStatus::Triaged)]
            .into_iter()
            .collect();
        let mirrors: MirroredIssues = [
            mirror("10", "1", MirrorStatus::Closed),
            mirror("20", "2", MirrorStatus::Open),
        ]
        .into_iter()
        .collect();

        let plan = plan(&upstream, &mirrors);

        assert!(plan.is_empty());
        assert_eq!(plan.unchanged, 2);
    }

    #[test]
    fn never_reopens_closed_mirror_of_open_bug() {
        let upstream: UpstreamBugs = [bug("1", BugStatus::Confirmed)].into_iter().collect();
        let mirrors: MirroredIssues = [mirror("10", "1", MirrorStatus::Closed)].into_iter().collect();

        assert!(plan(&upstream, &mirrors).is_empty());
    }

    #[test]
    fn reports_orphaned_mirrors_without_acting() {
        let upstream: UpstreamBugs = [bug("1", BugStatus::New)].into_iter().collect();
        let mirrors: MirroredIssues = [
            mirror("10", "1", MirrorStatus::Open),
            mirror("30", "3", MirrorStatus::Open),
            mirror("20", "2", MirrorStatus::Open),
        ]
        .into_iter()
        .collect();

        let plan = plan(&upstream, &mirrors);

        assert!(plan.is_empty());
        assert_eq!(plan.orphaned, ["2", "3"]);
    }

    #[test]
    fn actions_follow_fetch_order() {
        let upstream: UpstreamBugs = [
            bug("30", BugStatus::New),
            bug("10", BugStatus::FixReleased),
            bug("20", BugStatus::Incomplete),
        ]
        .into_iter()
        .collect();
        let mirrors: MirroredIssues = [mirror("5", "10", MirrorStatus::Open)].into_iter().collect();

        let ids: Vec<String> = plan(&upstream, &mirrors)
            .actions
            .iter()
            .map(|action| action.upstream_id().to_string())
            .collect();

        assert_eq!(ids, ["30", "10", "20"]);
    }
}
