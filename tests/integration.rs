use serde_json::{Value, json};
use std::net::SocketAddr;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use fileproxy_server::{Server, ServerConfig};

struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl TestServer {
    // Bind on an ephemeral port with its own root
    async fn start(root: &Path) -> Self {
        let server = Server::bind(ServerConfig::with_root(root)).await.unwrap();
        let addr = server.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.start_with_shutdown(async move {
            let _ = rx.await;
        }));
        Self {
            addr,
            shutdown: Some(tx),
            handle,
        }
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap().unwrap();
    }
}

struct RawResponse {
    status: u16,
    headers: String,
    body: Vec<u8>,
}

impl RawResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
    }
}

// Helper to send one HTTP/1.1 request and read the whole response
async fn send_request(
    addr: SocketAddr,
    method: &str,
    path: &str,
    content_type: Option<&str>,
    body: &str,
) -> RawResponse {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let mut request = format!(
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nContent-Length: {}\r\n",
        body.len()
    );
    if let Some(ct) = content_type {
        request.push_str(&format!("Content-Type: {ct}\r\n"));
    }
    request.push_str("\r\n");
    request.push_str(body);

    stream.write_all(request.as_bytes()).await.unwrap();
    stream.flush().await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();

    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has a header terminator");
    let headers = String::from_utf8_lossy(&raw[..split]).to_string();
    let body = raw[split + 4..].to_vec();
    let status = headers
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .unwrap();

    RawResponse {
        status,
        headers,
        body,
    }
}

async fn post_json(addr: SocketAddr, path: &str, body: Value) -> RawResponse {
    send_request(addr, "POST", path, Some("application/json"), &body.to_string()).await
}

#[tokio::test]
async fn test_file_proxy_scenario() {
    let root = tempfile::tempdir().unwrap();
    let server = TestServer::start(root.path()).await;
    let addr = server.addr;

    let response = post_json(addr, "/mkdir", json!({ "dirname": "testdir" })).await;
    assert_eq!(response.status, 200);
    assert!(response.header("content-type").unwrap().contains("json"));
    assert_eq!(response.json(), json!({ "created": "testdir" }));

    let response = send_request(
        addr,
        "POST",
        "/save?filename=testdir%2Ftestfile.json",
        Some("application/json"),
        r#"{"hello":"world"}"#,
    )
    .await;
    assert_eq!(response.status, 200);
    assert_eq!(response.json(), json!({ "saved": "testdir/testfile.json" }));

    let response = post_json(addr, "/list", json!({ "dirname": "testdir" })).await;
    assert_eq!(response.status, 200);
    let names: Vec<String> = response.json()["list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["testfile.json".to_string()]);

    let response = post_json(addr, "/load", json!({ "filename": "testdir/testfile.json" })).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.json()["hello"], "world");

    let response = post_json(addr, "/rmdir", json!({ "dirname": "testdir" })).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.json(), json!({ "removed": "testdir" }));
    assert!(!root.path().join("testdir").exists());

    server.stop().await;
}

#[tokio::test]
async fn test_preflight_over_tcp() {
    let root = tempfile::tempdir().unwrap();
    let server = TestServer::start(root.path()).await;

    let response = send_request(server.addr, "OPTIONS", "/save", None, "").await;
    assert_eq!(response.status, 200);
    assert!(response.body.is_empty());
    assert_eq!(response.header("access-control-allow-origin").unwrap(), "*");
    assert_eq!(
        response.header("access-control-allow-methods").unwrap(),
        "GET, POST, OPTIONS"
    );
    assert_eq!(
        response.header("access-control-allow-headers").unwrap(),
        "Content-Type"
    );

    server.stop().await;
}

#[tokio::test]
async fn test_traversal_over_tcp() {
    let parent = tempfile::tempdir().unwrap();
    let root = parent.path().join("root");
    let server = TestServer::start(&root).await;

    let response = send_request(
        server.addr,
        "POST",
        "/save?filename=..%2Foutside.txt",
        Some("text/plain"),
        "should never land",
    )
    .await;
    assert_eq!(response.status, 400);
    assert_eq!(response.json(), json!({ "error": "Invalid path: ../outside.txt" }));
    assert!(!parent.path().join("outside.txt").exists());

    let response = post_json(server.addr, "/load", json!({ "filename": "../root/../x" })).await;
    assert_eq!(response.status, 400);

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_route_over_tcp() {
    let root = tempfile::tempdir().unwrap();
    let server = TestServer::start(root.path()).await;

    let response = send_request(server.addr, "GET", "/status", None, "").await;
    assert_eq!(response.status, 404);
    assert_eq!(response.json(), json!({ "error": "Not found" }));
    assert_eq!(response.header("access-control-allow-origin").unwrap(), "*");

    server.stop().await;
}

#[tokio::test]
async fn test_independent_instances() {
    let first_root = tempfile::tempdir().unwrap();
    let second_root = tempfile::tempdir().unwrap();
    let first = TestServer::start(first_root.path()).await;
    let second = TestServer::start(second_root.path()).await;
    assert_ne!(first.addr, second.addr);

    let response = send_request(
        first.addr,
        "POST",
        "/save?filename=only-here.txt",
        Some("text/plain"),
        "first",
    )
    .await;
    assert_eq!(response.status, 200);

    let response = post_json(second.addr, "/load", json!({ "filename": "only-here.txt" })).await;
    assert_eq!(response.status, 404);
    assert!(first_root.path().join("only-here.txt").exists());

    first.stop().await;
    second.stop().await;
}
