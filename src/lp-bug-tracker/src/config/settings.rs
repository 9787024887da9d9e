//! Sync settings deserialization and validation.

use crate::config::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Pseudo path reported by validation errors for built-in defaults.
const DEFAULTS_SOURCE: &str = "<defaults>";

/// Settings describing which Launchpad package is mirrored into which GitHub repository.
///
/// Every key is optional in the settings file; missing keys keep the values
/// used for the lightdm-gtk-greeter project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Settings {
    /// Owner of the GitHub repository holding the mirrors.
    pub owner: String,

    /// Name of the GitHub repository holding the mirrors.
    pub repo: String,

    /// Launchpad distribution the package is published in.
    pub distribution: String,

    /// Source package name queried in the archive.
    pub source_package: String,

    /// Package name used when building bug links.
    pub source_url_name: String,

    /// Label carried by every mirrored issue.
    pub label: String,

    /// Root of the Launchpad web service.
    pub api_root: String,

    /// Directory for cached Launchpad responses (defaults to `~/.launchpadlib/cache`).
    pub cache_dir: Option<PathBuf>,

    /// Path to the `hub` executable.
    pub hub_path: PathBuf,

    /// Handlebars template for the provenance note of new mirrors.
    pub provenance_template: String,

    /// Handlebars template for the comment posted before closing a mirror.
    pub close_comment_template: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            owner: "Xubuntu".to_string(),
            repo: "lightdm-gtk-greeter".to_string(),
            distribution: "ubuntu".to_string(),
            source_package: "lightdm-gtk-greeter".to_string(),
            source_url_name: "lightdm-gtk-greeter".to_string(),
            label: "Launchpad".to_string(),
            api_root: default_api_root(),
            cache_dir: None,
            hub_path: default_hub_path(),
            provenance_template: default_provenance_template(),
            close_comment_template: default_close_comment_template(),
        }
    }
}

pub(crate) fn default_api_root() -> String {
    "https://api.launchpad.net/devel/".to_string()
}

pub(crate) fn default_hub_path() -> PathBuf {
    PathBuf::from(".github/hub")
}

/// Default template for the provenance note of a new mirror.
pub fn default_provenance_template() -> String {
    "Reported first on Launchpad at {{link}}".to_string()
}

/// Default template for the comment posted when a mirror is closed.
pub fn default_close_comment_template() -> String {
    "Issue closed on Launchpad with status: {{status}}".to_string()
}

/// Resolves the default Launchpad cache directory under the user's home.
///
/// Falls back to a path relative to the working directory when no home
/// directory can be determined.
#[must_use]
pub fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".launchpadlib")
        .join("cache")
}

impl Settings {
    /// Loads and validates settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid TOML,
    /// or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading settings");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        settings.validate(&path.display().to_string())?;
        Ok(settings)
    }

    /// Loads settings from the given file, or returns the defaults when no file is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file fails to load.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let settings = Self::default();
                settings.validate(DEFAULTS_SOURCE)?;
                Ok(settings)
            }
        }
    }

    /// Returns the configured cache directory or the default one.
    #[must_use]
    pub fn resolved_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(default_cache_dir)
    }

    /// Returns the `owner/repo` pair of the mirror repository.
    #[must_use]
    pub fn full_repo_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Validates settings values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the offending key.
    pub fn validate(&self, source: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: source.to_string(),
            message,
        };

        let required = [
            ("owner", &self.owner),
            ("repo", &self.repo),
            ("distribution", &self.distribution),
            ("source-package", &self.source_package),
            ("source-url-name", &self.source_url_name),
            ("label", &self.label),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(invalid(format!("{key} must not be empty")));
            }
        }

        for (key, value) in [("owner", &self.owner), ("repo", &self.repo)] {
            if value.contains('/') {
                return Err(invalid(format!("{key} must not contain '/'")));
            }
        }

        if Url::parse(&self.api_root).is_err() {
            return Err(invalid(format!(
                "api-root is not a valid URL: {}",
                self.api_root
            )));
        }

        if self.provenance_template.trim().is_empty() {
            return Err(invalid("provenance-template must not be empty".to_string()));
        }

        if self.close_comment_template.trim().is_empty() {
            return Err(invalid(
                "close-comment-template must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
