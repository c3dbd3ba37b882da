use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use copilot_demo_core::{DirectoryError, DirectoryUser, UserDirectory};
use copilot_demo_server::{AppState, ServerConfig, create_router};
use serde_json::Value;
use system_capabilities::EventLogReader;
use tower::ServiceExt;

#[derive(Clone)]
pub struct MockDirectory {
    result: Result<Vec<DirectoryUser>, DirectoryError>,
    calls: Arc<AtomicUsize>,
}

impl MockDirectory {
    pub fn with_users(users: &[(&str, &str)]) -> Self {
        Self::with_result(Ok(users
            .iter()
            .map(|(name, email)| DirectoryUser {
                display_name: Some(name.to_string()),
                principal_name: Some(email.to_string()),
            })
            .collect()))
    }

    pub fn with_result(result: Result<Vec<DirectoryUser>, DirectoryError>) -> Self {
        Self {
            result,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserDirectory for MockDirectory {
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

pub struct TestApp {
    pub router: Router,
    pub log_dir: tempfile::TempDir,
}

impl TestApp {
    pub fn new(directory: MockDirectory) -> Self {
        Self::build(directory, EventLogReader::new())
    }

    pub fn with_event_reader(events: EventLogReader) -> Self {
        Self::build(MockDirectory::with_users(&[]), events)
    }

    fn build(directory: MockDirectory, events: EventLogReader) -> Self {
        let log_dir = tempfile::tempdir().expect("tempdir");
        let vars: HashMap<&str, String> = HashMap::from([
            ("LOG_FOLDER", log_dir.path().display().to_string()),
            ("HEALTH_SAMPLE_MS", "0".to_string()),
            ("DEPLOYED_BASE_URL", "https://demo.example.net/".to_string()),
        ]);
        let config =
            ServerConfig::from_lookup(|key| vars.get(key).cloned()).expect("test config");

        let state = AppState::with_directory(&config, Arc::new(directory)).with_event_reader(events);
        Self {
            router: create_router(Arc::new(state)),
            log_dir,
        }
    }

    pub fn log_path(&self) -> &Path {
        self.log_dir.path()
    }

    pub async fn send(&self, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

pub fn write_aged(dir: &Path, name: &str, contents: &[u8], age_days: u64) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    let modified = SystemTime::now() - Duration::from_secs(age_days * 86_400 + 60);
    std::fs::File::options()
        .write(true)
        .open(&path)
        .and_then(|f| f.set_modified(modified))
        .expect("backdate fixture");
    path
}

pub fn encode(path: &Path) -> String {
    urlencoding::encode(&path.display().to_string()).into_owned()
}
