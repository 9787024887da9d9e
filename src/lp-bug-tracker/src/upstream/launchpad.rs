//! Anonymous, read-only client for the Launchpad web service.
//!
//! Only the three calls needed to list a source package's bug tasks are
//! implemented:
//! 1. `getPublishedSources` on the distribution's primary archive
//! 2. `getSourcePackage` on the distribution
//! 3. `searchTasks` on the source package

use super::{BugStatus, ResponseCache, UpstreamBug, UpstreamBugSource, UpstreamBugs, UpstreamError};
use crate::config::Settings;
use crate::title::{is_bug_id, split_task_title};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, info_span, Instrument};
use url::Url;

use super::status::SEARCHED_STATUSES;

/// A page of a Launchpad collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    /// Entries on this page.
    #[serde(default = "Vec::new")]
    pub entries: Vec<T>,

    /// Link to the next page, if any.
    #[serde(default)]
    pub next_collection_link: Option<String>,
}

/// Entry of a `getPublishedSources` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishedSource {
    /// Name of the source package as currently published.
    pub source_package_name: String,
}

/// Result of `getSourcePackage`.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcePackage {
    /// API link of the source package.
    pub self_link: String,
}

/// Entry of a `searchTasks` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct BugTask {
    /// API link of the bug, ending in its id.
    pub bug_link: String,

    /// Composite title, e.g. `Bug #1 in pkg (Ubuntu): "summary"`.
    pub title: String,

    /// Task status text.
    pub status: String,
}

/// Launchpad client for a single source package.
#[derive(Debug, Clone)]
pub struct LaunchpadClient {
    http: Client,
    api_root: Url,
    distribution: String,
    source_package: String,
    source_url_name: String,
    cache: Option<ResponseCache>,
}

impl LaunchpadClient {
    /// Builds a client for the package named in the settings.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if the API root is not a URL or the HTTP
    /// client cannot be built.
    pub fn new(settings: &Settings) -> Result<Self, UpstreamError> {
        let mut api_root = settings.api_root.clone();
        if !api_root.ends_with('/') {
            api_root.push('/');
        }
        let api_root = Url::parse(&api_root).map_err(|e| UpstreamError::InvalidUrl {
            url: api_root.clone(),
            source: e,
        })?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .user_agent(format!("{} LP bug checker", settings.source_package))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_root,
            distribution: settings.distribution.clone(),
            source_package: settings.source_package.clone(),
            source_url_name: settings.source_url_name.clone(),
            cache: None,
        })
    }

    /// Enables the response cache.
    #[must_use]
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Resolves the currently published name of the tracked source package.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::PackageNotFound`] if nothing is published
    /// under the configured name.
    pub async fn published_source_name(&self) -> Result<String, UpstreamError> {
        let mut url = self.endpoint(&format!("{}/+archive/primary", self.distribution))?;
        url.query_pairs_mut()
            .append_pair("ws.op", "getPublishedSources")
            .append_pair("source_name", &self.source_package);

        let page: Collection<PublishedSource> = self.get_json(url).await?;
        page.entries
            .into_iter()
            .next()
            .map(|source| source.source_package_name)
            .ok_or_else(|| UpstreamError::PackageNotFound {
                distribution: self.distribution.clone(),
                package: self.source_package.clone(),
            })
    }

    /// Returns the API link of a distribution source package.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if the request fails.
    pub async fn source_package_link(&self, name: &str) -> Result<Url, UpstreamError> {
        let mut url = self.endpoint(&self.distribution)?;
        url.query_pairs_mut()
            .append_pair("ws.op", "getSourcePackage")
            .append_pair("name", name);

        let package: SourcePackage = self.get_json(url).await?;
        parse_url(&package.self_link)
    }

    /// Lists the bug tasks of a source package in every known status.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if any page of the collection fails to load.
    pub async fn search_tasks(&self, package_link: &Url) -> Result<Vec<BugTask>, UpstreamError> {
        let mut url = package_link.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("ws.op", "searchTasks");
            for status in SEARCHED_STATUSES {
                query.append_pair("status", status);
            }
        }

        let mut tasks = Vec::new();
        let mut next = Some(url);
        while let Some(url) = next.take() {
            let page: Collection<BugTask> = self.get_json(url).await?;
            tasks.extend(page.entries);
            next = page
                .next_collection_link
                .as_deref()
                .map(parse_url)
                .transpose()?;
        }

        Ok(tasks)
    }

    /// Converts a bug task into an [`UpstreamBug`].
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if the bug link carries no id or the task
    /// title has no summary separator.
    pub fn bug_from_task(&self, task: BugTask) -> Result<UpstreamBug, UpstreamError> {
        let id = task
            .bug_link
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| is_bug_id(segment))
            .ok_or_else(|| UpstreamError::MalformedBugLink {
                link: task.bug_link.clone(),
            })?
            .to_string();

        let title = split_task_title(&task.title)
            .ok_or_else(|| UpstreamError::MalformedTaskTitle {
                bug_id: id.clone(),
                title: task.title.clone(),
            })?
            .to_string();

        let link = self.bug_web_link(&id)?;
        Ok(UpstreamBug::new(id, title, BugStatus::parse(&task.status), link))
    }

    /// Builds the Launchpad website link of a bug.
    ///
    /// Format: `https://bugs.launchpad.net/{distribution}/+source/{package}/+bug/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::InvalidUrl`] if the pieces do not form a URL.
    pub fn bug_web_link(&self, id: &str) -> Result<Url, UpstreamError> {
        parse_url(&format!(
            "https://bugs.launchpad.net/{}/+source/{}/+bug/{}",
            self.distribution, self.source_url_name, id
        ))
    }

    fn endpoint(&self, path: &str) -> Result<Url, UpstreamError> {
        self.api_root
            .join(path)
            .map_err(|e| UpstreamError::InvalidUrl {
                url: format!("{}{}", self.api_root, path),
                source: e,
            })
    }

    /// Performs a GET request, revalidating against the cache when possible.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, UpstreamError> {
        let key = url.to_string();
        let cached = self.cache.as_ref().and_then(|cache| cache.load(&key));

        let mut request = self.http.get(url);
        if let Some(entry) = &cached {
            request = request.header(header::IF_NONE_MATCH, entry.etag.as_str());
        }

        let response = request.send().await?;
        let status = response.status();

        let body = match cached {
            Some(entry) if status == StatusCode::NOT_MODIFIED => {
                debug!(url = %key, "Launchpad response not modified, using cache");
                entry.body
            }
            _ if !status.is_success() => {
                return Err(UpstreamError::Status { url: key, status });
            }
            _ => {
                let etag = response
                    .headers()
                    .get(header::ETAG)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string);
                let body = response.text().await?;
                if let (Some(cache), Some(etag)) = (&self.cache, etag) {
                    cache.store(&key, &etag, &body);
                }
                body
            }
        };

        serde_json::from_str(&body).map_err(|e| UpstreamError::Json {
            url: key,
            source: e,
        })
    }
}

#[async_trait]
impl UpstreamBugSource for LaunchpadClient {
    async fn fetch_bugs(&self) -> Result<UpstreamBugs, UpstreamError> {
        let span = info_span!(
            "fetch_bugs",
            distribution = %self.distribution,
            package = %self.source_package
        );

        async {
            let name = self.published_source_name().await?;
            debug!(published_name = %name, "Resolved published source");

            let package_link = self.source_package_link(&name).await?;
            let tasks = self.search_tasks(&package_link).await?;

            let mut bugs = UpstreamBugs::new();
            for task in tasks {
                bugs.insert(self.bug_from_task(task)?);
            }

            info!(count = bugs.len(), "Fetched Launchpad bugs");
            Ok(bugs)
        }
        .instrument(span)
        .await
    }
}

fn parse_url(value: &str) -> Result<Url, UpstreamError> {
    Url::parse(value).map_err(|e| UpstreamError::InvalidUrl {
        url: value.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> LaunchpadClient {
        LaunchpadClient::new(&Settings::default()).unwrap()
    }

    fn task(bug_link: &str, title: &str, status: &str) -> BugTask {
        BugTask {
            bug_link: bug_link.to_string(),
            title: title.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn converts_task_to_bug() {
        let bug = client()
            .bug_from_task(task(
                "https://api.launchpad.net/devel/bugs/1234567",
                "Bug #1234567 in lightdm-gtk-greeter (Ubuntu): \"Greeter freezes\"",
                "Won't Fix",
            ))
            .unwrap();

        assert_eq!(bug.id, "1234567");
        assert_eq!(bug.title, "\"Greeter freezes\"");
        assert_eq!(bug.status, BugStatus::WontFix);
        assert!(bug.closed);
        assert_eq!(
            bug.link.as_str(),
            "https://bugs.launchpad.net/ubuntu/+source/lightdm-gtk-greeter/+bug/1234567"
        );
    }

    #[test]
    fn task_title_without_separator_is_an_error() {
        let result = client().bug_from_task(task(
            "https://api.launchpad.net/devel/bugs/1",
            "Bug #1 without separator",
            "New",
        ));

        assert!(matches!(
            result,
            Err(UpstreamError::MalformedTaskTitle { ref bug_id, .. }) if bug_id == "1"
        ));
    }

    #[test]
    fn bug_link_without_id_is_an_error() {
        let result = client().bug_from_task(task(
            "https://api.launchpad.net/devel/bugs/",
            "Bug #1 in pkg: x",
            "New",
        ));

        assert!(matches!(result, Err(UpstreamError::MalformedBugLink { .. })));
    }

    #[test]
    fn api_root_without_trailing_slash_is_normalized() {
        let settings = Settings {
            api_root: "https://api.launchpad.net/devel".to_string(),
            ..Settings::default()
        };
        let client = LaunchpadClient::new(&settings).unwrap();

        let url = client.endpoint("ubuntu").unwrap();
        assert_eq!(url.as_str(), "https://api.launchpad.net/devel/ubuntu");
    }

    #[test]
    fn decodes_collection_page() {
        let page: Collection<PublishedSource> = serde_json::from_str(
            r#"{"total_size": 1, "start": 0, "entries": [{"source_package_name": "lightdm-gtk-greeter"}]}"#,
        )
        .unwrap();

        assert_eq!(page.entries.len(), 1);
        assert!(page.next_collection_link.is_none());
    }
}
