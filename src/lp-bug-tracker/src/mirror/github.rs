//! Mirror backend talking to the GitHub REST API through octocrab.

use super::{IssueMirror, MirrorError, MirrorStatus, MirroredIssue, MirroredIssues, NewMirror};
use crate::config::Settings;
use crate::title::parse_title;
use async_trait::async_trait;
use octocrab::models::IssueState;
use octocrab::{params, Octocrab};
use tracing::{debug, info};

/// Issue mirror backed by the GitHub REST API.
#[derive(Clone)]
pub struct GitHubApiMirror {
    octocrab: Octocrab,
    owner: String,
    repo: String,
    label: String,
}

impl GitHubApiMirror {
    /// Creates an authenticated backend for the repository in the settings.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::GitHub`] if the client cannot be built.
    pub fn new(settings: &Settings, token: String) -> Result<Self, MirrorError> {
        let octocrab = Octocrab::builder().personal_token(token).build()?;
        Ok(Self::with_client(settings, octocrab))
    }

    /// Creates a backend around an existing client.
    #[must_use]
    pub fn with_client(settings: &Settings, octocrab: Octocrab) -> Self {
        Self {
            octocrab,
            owner: settings.owner.clone(),
            repo: settings.repo.clone(),
            label: settings.label.clone(),
        }
    }

    fn issue_number(issue_id: &str) -> Result<u64, MirrorError> {
        issue_id.parse().map_err(|_| MirrorError::InvalidIssueId {
            id: issue_id.to_string(),
        })
    }
}

#[async_trait]
impl IssueMirror for GitHubApiMirror {
    async fn fetch_issues(&self) -> Result<MirroredIssues, MirrorError> {
        let labels = [self.label.clone()];
        let first_page = self
            .octocrab
            .issues(&self.owner, &self.repo)
            .list()
            .labels(&labels)
            .state(params::State::All)
            .per_page(100)
            .send()
            .await?;
        let all_issues = self.octocrab.all_pages(first_page).await?;

        let mut issues = MirroredIssues::new();
        for issue in all_issues {
            if issue.pull_request.is_some() {
                continue;
            }

            let Some(parsed) = parse_title(&issue.title) else {
                debug!(issue_number = issue.number, "Skipping issue without LP# token");
                continue;
            };

            let status = match issue.state {
                IssueState::Closed => MirrorStatus::Closed,
                _ => MirrorStatus::Open,
            };

            issues.insert(MirroredIssue {
                id: issue.number.to_string(),
                status,
                upstream_id: parsed.upstream_id.to_string(),
                title: parsed.title.to_string(),
            });
        }

        info!(count = issues.len(), "Fetched mirrored issues");
        Ok(issues)
    }

    async fn create_issue(&self, issue: &NewMirror) -> Result<(), MirrorError> {
        let created = self
            .octocrab
            .issues(&self.owner, &self.repo)
            .create(&issue.title)
            .body(&issue.body)
            .labels(vec![self.label.clone()])
            .send()
            .await?;

        debug!(issue_number = created.number, "GitHub issue created");
        Ok(())
    }

    async fn comment_issue(&self, issue_id: &str, body: &str) -> Result<(), MirrorError> {
        let number = Self::issue_number(issue_id)?;
        self.octocrab
            .issues(&self.owner, &self.repo)
            .create_comment(number, body)
            .await?;
        Ok(())
    }

    async fn close_issue(&self, issue_id: &str) -> Result<(), MirrorError> {
        let number = Self::issue_number(issue_id)?;
        self.octocrab
            .issues(&self.owner, &self.repo)
            .update(number)
            .state(IssueState::Closed)
            .send()
            .await?;
        Ok(())
    }

    fn describe_create(&self, issue: &NewMirror) -> String {
        format!(
            "POST /repos/{}/{}/issues title={:?} labels=[{}]",
            self.owner, self.repo, issue.title, self.label
        )
    }

    fn describe_comment(&self, issue_id: &str, body: &str) -> String {
        format!(
            "POST /repos/{}/{}/issues/{}/comments body={:?}",
            self.owner, self.repo, issue_id, body
        )
    }

    fn describe_close(&self, issue_id: &str) -> String {
        format!(
            "PATCH /repos/{}/{}/issues/{} state=closed",
            self.owner, self.repo, issue_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_issue_numbers() {
        assert_eq!(GitHubApiMirror::issue_number("42").unwrap(), 42);
        assert!(matches!(
            GitHubApiMirror::issue_number("#42"),
            Err(MirrorError::InvalidIssueId { .. })
        ));
    }
}
