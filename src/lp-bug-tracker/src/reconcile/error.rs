//! Sync action error types.

use crate::mirror::MirrorError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Errors that can occur while applying a sync action.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// Rendering a note or comment failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The mirror tracker rejected a change.
    #[error(transparent)]
    Mirror(#[from] MirrorError),
}
