//! Applying planned actions to the mirror tracker.

use super::{ApplyError, SyncAction};
use crate::mirror::{IssueMirror, NewMirror};
use crate::templates::TemplateRenderer;
use tracing::{info, info_span, Instrument};
use url::Url;

/// Everything needed to carry out sync actions.
pub struct ApplyContext<'a> {
    /// Destination tracker.
    pub mirror: &'a dyn IssueMirror,

    /// Compiled note and comment templates.
    pub renderer: &'a TemplateRenderer,

    /// Print the mirror calls instead of making them.
    pub dry_run: bool,
}

/// Carries out a single planned action.
///
/// # Errors
///
/// Returns [`ApplyError`] if rendering or a mirror call fails.
pub async fn apply_action(ctx: &ApplyContext<'_>, action: &SyncAction) -> Result<(), ApplyError> {
    match action {
        SyncAction::Create {
            upstream_id,
            title,
            link,
        } => create_mirror(ctx, upstream_id, title, link).await.map(|_| ()),
        SyncAction::Close {
            upstream_id,
            issue_id,
            status,
        } => close_mirror(ctx, upstream_id, issue_id, status).await,
    }
}

/// Opens a mirror for a Launchpad bug.
///
/// The issue title is `LP#<id> <title>` and the body a provenance note
/// linking back to Launchpad.
///
/// # Returns
///
/// The issue that was (or, in a dry run, would have been) created.
///
/// # Errors
///
/// Returns [`ApplyError`] if the note cannot be rendered or the mirror
/// tracker rejects the issue.
pub async fn create_mirror(
    ctx: &ApplyContext<'_>,
    upstream_id: &str,
    title: &str,
    link: &Url,
) -> Result<NewMirror, ApplyError> {
    let span = info_span!("create_mirror", upstream_id = %upstream_id);

    async {
        let note = ctx
            .renderer
            .render_provenance_note(upstream_id, title, link.as_str())?;
        let issue = NewMirror::new(upstream_id, title, note);

        if ctx.dry_run {
            println!("[DRY RUN] {}", ctx.mirror.describe_create(&issue));
            return Ok(issue);
        }

        info!(title = %issue.title, link = %link, "Creating mirror");
        ctx.mirror.create_issue(&issue).await?;
        Ok(issue)
    }
    .instrument(span)
    .await
}

/// Closes the mirror of a closed Launchpad bug.
///
/// A comment naming the Launchpad status is posted first, then the issue is
/// closed. The two calls are not atomic: when the close fails after the
/// comment went through, the next run closes the issue and comments again.
///
/// # Errors
///
/// Returns [`ApplyError`] if the comment cannot be rendered or either
/// mirror call fails.
pub async fn close_mirror(
    ctx: &ApplyContext<'_>,
    upstream_id: &str,
    issue_id: &str,
    status: &str,
) -> Result<(), ApplyError> {
    let span = info_span!("close_mirror", upstream_id = %upstream_id, issue_id = %issue_id);

    async {
        let comment = ctx
            .renderer
            .render_close_comment(upstream_id, issue_id, status)?;

        if ctx.dry_run {
            println!("[DRY RUN] {}", ctx.mirror.describe_comment(issue_id, &comment));
            println!("[DRY RUN] {}", ctx.mirror.describe_close(issue_id));
            return Ok(());
        }

        info!(status = %status, "Closing mirror");
        ctx.mirror.comment_issue(issue_id, &comment).await?;
        ctx.mirror.close_issue(issue_id).await?;
        Ok(())
    }
    .instrument(span)
    .await
}
