#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod mirror;
pub mod reconcile;
pub mod runner;
pub mod summary;
pub mod templates;
pub mod title;
pub mod upstream;

pub use config::{ConfigError, Settings};
pub use mirror::{
    parse_issue_line, parse_issue_list, GitHubApiMirror, HubCli, IssueMirror, MirrorError,
    MirrorStatus, MirroredIssue, MirroredIssues, NewMirror,
};
pub use reconcile::{
    apply_action, close_mirror, create_mirror, plan, ApplyContext, ApplyError, SyncAction,
    SyncPlan,
};
pub use runner::{MirrorBackend, Runner, RunnerConfig, RunnerError, UnknownBackendError};
pub use summary::RunSummary;
pub use templates::{create_handlebars_registry, TemplateError, TemplateRenderer};
pub use title::{compose_title, parse_title, split_task_title, ParsedTitle};
pub use upstream::{
    BugStatus, LaunchpadClient, ResponseCache, UpstreamBug, UpstreamBugSource, UpstreamBugs,
    UpstreamError,
};
