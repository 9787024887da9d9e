//! Runner error types.

/// Errors that can occur during a sync run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Settings loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Launchpad errors.
    #[error(transparent)]
    Upstream(#[from] crate::upstream::UpstreamError),

    /// Mirror tracker errors.
    #[error(transparent)]
    Mirror(#[from] crate::mirror::MirrorError),

    /// A configured template does not compile.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// Errors applying a sync action.
    #[error(transparent)]
    Apply(#[from] crate::reconcile::ApplyError),

    /// The API backend was selected without a GitHub token.
    #[error("The GitHub API backend requires a token (set GITHUB_TOKEN or pass --token)")]
    MissingToken,
}

/// A mirror backend name other than `hub` or `api`.
#[derive(Debug, thiserror::Error)]
#[error("Unknown mirror backend '{0}' (expected 'hub' or 'api')")]
pub struct UnknownBackendError(pub String);
