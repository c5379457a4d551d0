//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use loggifly_helper::config::HelperConfig;
use loggifly_helper::http::HttpServer;
use loggifly_helper::lifecycle::Shutdown;
use loggifly_helper::writer::rotation::list_backups;
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A helper instance running on an ephemeral port with its own scratch directory.
pub struct RunningHelper {
    pub addr: SocketAddr,
    pub log_path: PathBuf,
    pub client: reqwest::Client,
    shutdown: Shutdown,
    handle: JoinHandle<()>,
    // Held so the directory outlives the server.
    _dir: TempDir,
}

impl RunningHelper {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_json(&self, body: &str) -> reqwest::Response {
        self.client
            .post(self.url("/webhook"))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("helper unreachable")
    }

    pub async fn get_json(&self, path: &str) -> (u16, Value) {
        let res = self.client.get(self.url(path)).send().await.expect("helper unreachable");
        let status = res.status().as_u16();
        (status, res.json().await.expect("response is not JSON"))
    }

    #[allow(dead_code)]
    pub fn scratch_dir(&self) -> &Path {
        self._dir.path()
    }

    pub async fn stop(self) {
        let RunningHelper {
            client,
            shutdown,
            handle,
            ..
        } = self;
        // Idle keep-alive connections would hold up the graceful drain.
        drop(client);
        shutdown.trigger();
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
}

/// Start the helper with default config adjusted by `configure`.
///
/// The log file lives at `<scratch>/logs/notifications.log`.
pub async fn start_helper<F>(configure: F) -> RunningHelper
where
    F: FnOnce(&mut HelperConfig),
{
    let dir = tempfile::tempdir().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = HelperConfig::default();
    config.server.host = addr.ip().to_string();
    config.server.port = addr.port();
    config.log.file = dir.path().join("logs").join("notifications.log");
    configure(&mut config);
    let log_path = config.log.file.clone();

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signal();
    let handle = tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    RunningHelper {
        addr,
        log_path,
        client,
        shutdown,
        handle,
        _dir: dir,
    }
}

/// Lines of a single file; empty when it does not exist.
pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Every line in the active file and all backups.
#[allow(dead_code)]
pub fn read_corpus(path: &Path) -> Vec<String> {
    let mut lines = read_lines(path);
    for (_, backup) in list_backups(path).unwrap() {
        lines.extend(read_lines(&backup));
    }
    lines
}

/// Width of the rendered timestamp (`YYYY-MM-DDTHH:MM:SS.ffffff`).
#[allow(dead_code)]
pub const TIMESTAMP_WIDTH: usize = 26;
