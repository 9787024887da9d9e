//! Runner configuration.

use super::UnknownBackendError;
use crate::config::Settings;
use std::fmt;
use std::str::FromStr;

/// Which implementation talks to the mirror tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MirrorBackend {
    /// Shell out to the `hub` command-line client.
    #[default]
    Hub,
    /// Call the GitHub REST API directly.
    Api,
}

impl fmt::Display for MirrorBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorBackend::Hub => write!(f, "hub"),
            MirrorBackend::Api => write!(f, "api"),
        }
    }
}

impl FromStr for MirrorBackend {
    type Err = UnknownBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hub" => Ok(MirrorBackend::Hub),
            "api" => Ok(MirrorBackend::Api),
            _ => Err(UnknownBackendError(s.to_string())),
        }
    }
}

/// Configuration for a sync run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Package, repository and template settings.
    settings: Settings,
    /// Whether to preview changes without touching the mirror tracker.
    dry_run: bool,
    /// Mirror tracker implementation.
    backend: MirrorBackend,
    /// GitHub token, required by the API backend.
    token: Option<String>,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(settings: Settings, dry_run: bool) -> Self {
        Self {
            settings,
            dry_run,
            backend: MirrorBackend::default(),
            token: None,
        }
    }

    /// Sets the mirror backend.
    pub fn with_backend(mut self, backend: MirrorBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the GitHub token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Returns the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the mirror backend.
    pub fn backend(&self) -> MirrorBackend {
        self.backend
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_names() {
        assert_eq!("hub".parse::<MirrorBackend>().unwrap(), MirrorBackend::Hub);
        assert_eq!("API".parse::<MirrorBackend>().unwrap(), MirrorBackend::Api);
        assert!("gitlab".parse::<MirrorBackend>().is_err());
        assert_eq!(MirrorBackend::Api.to_string(), "api");
    }
}
