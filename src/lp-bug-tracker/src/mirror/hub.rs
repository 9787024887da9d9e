//! Mirror backend driving the `hub` command-line client.

use super::{parse_issue_list, IssueMirror, MirrorError, MirroredIssues, NewMirror};
use crate::config::Settings;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Output format requested from `hub issue`: number, state and title.
pub const LIST_FORMAT: &str = "%I %S %t%n";

/// Issue mirror backed by the `hub` executable.
#[derive(Debug, Clone)]
pub struct HubCli {
    hub_path: PathBuf,
    owner: String,
    repo: String,
    label: String,
}

impl HubCli {
    /// Creates a backend using the executable and repository from the settings.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            hub_path: settings.hub_path.clone(),
            owner: settings.owner.clone(),
            repo: settings.repo.clone(),
            label: settings.label.clone(),
        }
    }

    /// Arguments listing all labelled issues.
    #[must_use]
    pub fn list_args(&self) -> Vec<String> {
        [
            "issue",
            "--labels",
            self.label.as_str(),
            "--state",
            "all",
            "--format",
            LIST_FORMAT,
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    /// Arguments creating a mirror. Each `--message` becomes one paragraph;
    /// the first is the title.
    #[must_use]
    pub fn create_args(&self, issue: &NewMirror) -> Vec<String> {
        [
            "issue",
            "create",
            "--message",
            issue.title.as_str(),
            "--message",
            issue.body.as_str(),
            "-l",
            self.label.as_str(),
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    /// Arguments posting a comment through the REST API passthrough.
    #[must_use]
    pub fn comment_args(&self, issue_id: &str, body: &str) -> Vec<String> {
        vec![
            "api".to_string(),
            format!("repos/{}/{}/issues/{}/comments", self.owner, self.repo, issue_id),
            "--field".to_string(),
            format!("body={body}"),
        ]
    }

    /// Arguments closing an issue.
    #[must_use]
    pub fn close_args(&self, issue_id: &str) -> Vec<String> {
        ["issue", "update", issue_id, "--state", "closed"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Renders a command line for logs and dry runs.
    #[must_use]
    pub fn render_command(&self, args: &[String]) -> String {
        let mut rendered = self.hub_path.display().to_string();
        for arg in args {
            rendered.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) || arg.contains('"') {
                rendered.push_str(&format!("{arg:?}"));
            } else {
                rendered.push_str(arg);
            }
        }
        rendered
    }

    /// Runs `hub` and returns its standard output.
    async fn run(&self, args: &[String]) -> Result<String, MirrorError> {
        let command = self.render_command(args);
        debug!(command = %command, "Running hub");

        let output = Command::new(&self.hub_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| MirrorError::Spawn {
                command: command.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(MirrorError::CommandFailed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl IssueMirror for HubCli {
    async fn fetch_issues(&self) -> Result<MirroredIssues, MirrorError> {
        let output = self.run(&self.list_args()).await?;
        let issues = parse_issue_list(&output)?;
        info!(count = issues.len(), "Fetched mirrored issues");
        Ok(issues)
    }

    async fn create_issue(&self, issue: &NewMirror) -> Result<(), MirrorError> {
        self.run(&self.create_args(issue)).await?;
        Ok(())
    }

    async fn comment_issue(&self, issue_id: &str, body: &str) -> Result<(), MirrorError> {
        self.run(&self.comment_args(issue_id, body)).await?;
        Ok(())
    }

    async fn close_issue(&self, issue_id: &str) -> Result<(), MirrorError> {
        self.run(&self.close_args(issue_id)).await?;
        Ok(())
    }

    fn describe_create(&self, issue: &NewMirror) -> String {
        self.render_command(&self.create_args(issue))
    }

    fn describe_comment(&self, issue_id: &str, body: &str) -> String {
        self.render_command(&self.comment_args(issue_id, body))
    }

    fn describe_close(&self, issue_id: &str) -> String {
        self.render_command(&self.close_args(issue_id))
    }
}
