//! Settings loading.
//!
//! This module parses the optional TOML settings file naming the Launchpad
//! package and the GitHub repository to keep in sync.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{
    default_cache_dir, default_close_comment_template, default_provenance_template, Settings,
};
