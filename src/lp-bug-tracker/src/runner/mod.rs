//! Orchestrates a Launchpad to GitHub sync run.

mod config;
mod error;

pub use config::{MirrorBackend, RunnerConfig};
pub use error::{RunnerError, UnknownBackendError};

use crate::mirror::{GitHubApiMirror, HubCli, IssueMirror};
use crate::reconcile::{apply_action, plan, ApplyContext};
use crate::summary::RunSummary;
use crate::templates::TemplateRenderer;
use crate::upstream::{LaunchpadClient, ResponseCache, UpstreamBugSource};
use tracing::{debug, error, info, warn};

/// Runs one sync pass: fetch bugs, fetch mirrors, reconcile.
pub struct Runner {
    config: RunnerConfig,
    source: Box<dyn UpstreamBugSource>,
    mirror: Box<dyn IssueMirror>,
    renderer: TemplateRenderer,
}

impl Runner {
    /// Builds a runner talking to Launchpad and the configured mirror backend.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if a client cannot be built, a template does
    /// not compile, or the API backend is selected without a token.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let settings = config.settings();
        let cache = ResponseCache::new(settings.resolved_cache_dir());
        debug!(cache_dir = %cache.dir().display(), "Using Launchpad response cache");
        let source = LaunchpadClient::new(settings)?.with_cache(cache);

        let mirror: Box<dyn IssueMirror> = match config.backend() {
            MirrorBackend::Hub => Box::new(HubCli::new(settings)),
            MirrorBackend::Api => {
                let token = config.token().ok_or(RunnerError::MissingToken)?;
                Box::new(GitHubApiMirror::new(settings, token.to_string())?)
            }
        };

        Self::with_backends(config, Box::new(source), mirror)
    }

    /// Builds a runner around existing bug source and mirror implementations.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Template`] if a configured template does not
    /// compile.
    pub fn with_backends(
        config: RunnerConfig,
        source: Box<dyn UpstreamBugSource>,
        mirror: Box<dyn IssueMirror>,
    ) -> Result<Self, RunnerError> {
        let renderer = TemplateRenderer::from_settings(config.settings())?;
        Ok(Self {
            config,
            source,
            mirror,
            renderer,
        })
    }

    /// Executes the full sync flow.
    ///
    /// Actions are applied one at a time in Launchpad order; the first
    /// failure aborts the run.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if a fetch or an action fails.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let settings = self.config.settings();
        let mut summary = RunSummary::new(self.config.dry_run());

        info!(
            distribution = %settings.distribution,
            package = %settings.source_package,
            "Fetching Launchpad bugs"
        );
        let upstream = self.source.fetch_bugs().await?;
        summary.upstream_bugs = upstream.len();

        if upstream.is_empty() {
            warn!("No Launchpad bugs found");
            return Ok(summary);
        }

        info!(repo = %settings.full_repo_name(), label = %settings.label, "Fetching mirrored issues");
        let mirrors = self.mirror.fetch_issues().await?;
        summary.mirrored_issues = mirrors.len();

        let plan = plan(&upstream, &mirrors);
        summary.record_plan(&plan);
        for upstream_id in &plan.orphaned {
            debug!(upstream_id = %upstream_id, "Mirror has no Launchpad bug listed, leaving it alone");
        }

        if plan.is_empty() {
            info!("Mirrors are up to date");
            return Ok(summary);
        }

        info!(count = plan.actions.len(), "Applying sync actions");
        let ctx = ApplyContext {
            mirror: self.mirror.as_ref(),
            renderer: &self.renderer,
            dry_run: self.config.dry_run(),
        };

        for action in &plan.actions {
            if let Err(e) = apply_action(&ctx, action).await {
                error!(upstream_id = %action.upstream_id(), error = %e, "Sync action failed, stopping");
                return Err(e.into());
            }
            summary.record_action(action);
        }

        Ok(summary)
    }
}
