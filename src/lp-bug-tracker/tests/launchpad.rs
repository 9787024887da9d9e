use std::sync::{Arc, Mutex};

use lp_bug_tracker::{
    BugStatus, LaunchpadClient, ResponseCache, Settings, UpstreamBugSource, UpstreamError,
};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A request as seen by the stub server.
#[derive(Debug, Clone)]
struct Recorded {
    target: String,
    if_none_match: Option<String>,
    user_agent: Option<String>,
}

struct Reply {
    status: u16,
    etag: Option<&'static str>,
    body: String,
}

impl Reply {
    fn json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            etag: None,
            body: body.into(),
        }
    }

    fn status(status: u16) -> Self {
        Self {
            status,
            etag: None,
            body: String::new(),
        }
    }
}

type Handler = Arc<dyn Fn(&Recorded) -> Reply + Send + Sync>;

/// Minimal HTTP/1.1 server answering one request per connection.
struct Stub {
    api_root: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Stub {
    async fn start<F>(make_handler: impl FnOnce(String) -> F) -> Self
    where
        F: Fn(&Recorded) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let api_root = format!("http://{}/devel/", listener.local_addr().unwrap());
        let handler: Handler = Arc::new(make_handler(api_root.clone()));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let handler = Arc::clone(&handler);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let mut head = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        let n = socket.read(&mut buf).await.unwrap();
                        if n == 0 {
                            return;
                        }
                        head.extend_from_slice(&buf[..n]);
                    }

                    let request = parse_request(&String::from_utf8_lossy(&head));
                    recorded.lock().unwrap().push(request.clone());
                    let reply = handler(&request);

                    let mut response = format!(
                        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
                        reply.status,
                        reply.body.len()
                    );
                    if let Some(etag) = reply.etag {
                        response.push_str(&format!("ETag: {etag}\r\n"));
                    }
                    response.push_str("\r\n");
                    response.push_str(&reply.body);

                    socket.write_all(response.as_bytes()).await.unwrap();
                    socket.shutdown().await.ok();
                });
            }
        });

        Self { api_root, requests }
    }

    fn settings(&self) -> Settings {
        Settings {
            api_root: self.api_root.clone(),
            ..Settings::default()
        }
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn parse_request(head: &str) -> Recorded {
    let mut lines = head.lines();
    let target = lines
        .next()
        .and_then(|line| line.split(' ').nth(1))
        .unwrap_or_default()
        .to_string();

    let mut request = Recorded {
        target,
        if_none_match: None,
        user_agent: None,
    };
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        match name.trim().to_ascii_lowercase().as_str() {
            "if-none-match" => request.if_none_match = Some(value.trim().to_string()),
            "user-agent" => request.user_agent = Some(value.trim().to_string()),
            _ => {}
        }
    }
    request
}

fn task(id: &str, summary: &str, status: &str) -> String {
    format!(
        r#"{{"bug_link": "https://api.launchpad.net/devel/bugs/{id}", "title": "Bug #{id} in lightdm-gtk-greeter (Ubuntu): \"{summary}\"", "status": "{status}"}}"#
    )
}

fn published_sources() -> Reply {
    Reply::json(r#"{"total_size": 1, "entries": [{"source_package_name": "lightdm-gtk-greeter"}]}"#)
}

#[tokio::test]
async fn fetches_bugs_across_task_pages() {
    let stub = Stub::start(|api_root| {
        move |request: &Recorded| {
            if request.target.contains("getPublishedSources") {
                published_sources()
            } else if request.target.contains("getSourcePackage") {
                Reply::json(format!(
                    r#"{{"self_link": "{api_root}ubuntu/+source/lightdm-gtk-greeter"}}"#
                ))
            } else if request.target.contains("ws.start=2") {
                Reply::json(format!(
                    r#"{{"entries": [{}]}}"#,
                    task("1385567", "Unlock fails", "Won't Fix")
                ))
            } else if request.target.contains("searchTasks") {
                Reply::json(format!(
                    r#"{{"entries": [{}, {}], "next_collection_link": "{api_root}ubuntu/+source/lightdm-gtk-greeter?ws.op=searchTasks&ws.start=2"}}"#,
                    task("1870591", "Wrong layout shown", "Confirmed"),
                    task("1592110", "Crash on login", "Fix Released"),
                ))
            } else {
                Reply::status(404)
            }
        }
    })
    .await;

    let client = LaunchpadClient::new(&stub.settings()).unwrap();
    let bugs = client.fetch_bugs().await.unwrap();

    let ids: Vec<&str> = bugs.iter().map(|bug| bug.id.as_str()).collect();
    assert_eq!(ids, ["1870591", "1592110", "1385567"]);
    assert_eq!(bugs.get("1592110").unwrap().status, BugStatus::FixReleased);
    assert!(bugs.get("1385567").unwrap().closed);
    assert!(!bugs.get("1870591").unwrap().closed);

    let requests = stub.requests();
    assert_eq!(requests.len(), 4);
    assert!(requests[0].target.starts_with("/devel/ubuntu/+archive/primary?"));
    assert!(requests[0].target.contains("source_name=lightdm-gtk-greeter"));
    assert!(requests[1].target.starts_with("/devel/ubuntu?"));
    assert!(requests[1].target.contains("name=lightdm-gtk-greeter"));
    assert_eq!(requests[2].target.matches("status=").count(), 11);
    assert!(requests[3].target.contains("ws.start=2"));
    assert_eq!(
        requests[0].user_agent.as_deref(),
        Some("lightdm-gtk-greeter LP bug checker")
    );
}

#[tokio::test]
async fn unpublished_package_is_not_found() {
    let stub = Stub::start(|_| |_: &Recorded| Reply::json(r#"{"total_size": 0, "entries": []}"#)).await;

    let client = LaunchpadClient::new(&stub.settings()).unwrap();
    let result = client.fetch_bugs().await;

    assert!(matches!(
        result,
        Err(UpstreamError::PackageNotFound { ref package, .. }) if package == "lightdm-gtk-greeter"
    ));
    assert_eq!(stub.requests().len(), 1);
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let stub = Stub::start(|_| |_: &Recorded| Reply::status(500)).await;

    let client = LaunchpadClient::new(&stub.settings()).unwrap();
    let result = client.published_source_name().await;

    match result {
        Err(UpstreamError::Status { url, status }) => {
            assert_eq!(status.as_u16(), 500);
            assert!(url.contains("getPublishedSources"));
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn not_modified_response_reuses_cached_body() {
    let stub = Stub::start(|_| {
        |request: &Recorded| match request.if_none_match.as_deref() {
            Some("\"v1\"") => Reply::status(304),
            _ => Reply {
                etag: Some("\"v1\""),
                ..published_sources()
            },
        }
    })
    .await;
    let temp = TempDir::new().unwrap();

    let client = LaunchpadClient::new(&stub.settings())
        .unwrap()
        .with_cache(ResponseCache::new(temp.path()));

    let first = client.published_source_name().await.unwrap();
    let second = client.published_source_name().await.unwrap();

    assert_eq!(first, "lightdm-gtk-greeter");
    assert_eq!(second, "lightdm-gtk-greeter");

    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].if_none_match, None);
    assert_eq!(requests[1].if_none_match.as_deref(), Some("\"v1\""));
}

#[tokio::test]
async fn not_modified_without_cache_entry_is_an_error() {
    let stub = Stub::start(|_| |_: &Recorded| Reply::status(304)).await;

    let client = LaunchpadClient::new(&stub.settings()).unwrap();
    let result = client.published_source_name().await;

    assert!(matches!(result, Err(UpstreamError::Status { .. })));
}
