//! Shared mock sites for integration tests.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use site_race::config::ServiceConfig;

/// Default config for tests: short fetch timeout, no system proxy.
#[allow(dead_code)]
pub fn test_config(fetch_timeout_secs: u64) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.fetch.timeout_secs = fetch_timeout_secs;
    config.fetch.system_proxy = false;
    config
}

/// Read the request head and return its path.
#[allow(dead_code)]
async fn read_request_path(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let head = String::from_utf8_lossy(&buf);
    head.lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .map(str::to_string)
}

fn status_line(status: u16) -> String {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown");
    format!("{} {}", status, reason)
}

/// A mock site whose reply is computed per request from the request path.
///
/// Returns the site's base URL.
#[allow(dead_code)]
pub async fn start_programmable_site<F, Fut>(f: F) -> String
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some(path) = read_request_path(&mut socket).await else {
                            return;
                        };
                        let (status, body) = f(path).await;
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    format!("http://{}", addr)
}

/// A mock site returning `body` with 200 after `delay`.
///
/// The flag flips to true as soon as a request reaches the site.
#[allow(dead_code)]
pub async fn start_mock_site(body: &'static str, delay: Duration) -> (String, Arc<AtomicBool>) {
    start_mock_site_with_status(200, body, delay).await
}

#[allow(dead_code)]
pub async fn start_mock_site_with_status(
    status: u16,
    body: &'static str,
    delay: Duration,
) -> (String, Arc<AtomicBool>) {
    let visited = Arc::new(AtomicBool::new(false));
    let flag = visited.clone();
    let url = start_programmable_site(move |_path| {
        let flag = flag.clone();
        async move {
            flag.store(true, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            (status, body.to_string())
        }
    })
    .await;
    (url, visited)
}

/// A site that reads the request and drops the connection without replying.
#[allow(dead_code)]
pub async fn start_hangup_site() -> String {
    start_raw_site(|mut socket| async move {
        let _ = read_request_path(&mut socket).await;
        drop(socket);
    })
    .await
}

/// A site that answers with something that is not HTTP.
#[allow(dead_code)]
pub async fn start_garbage_site() -> String {
    start_raw_site(|mut socket| async move {
        let _ = read_request_path(&mut socket).await;
        let _ = socket
            .write_all(b"Now we're speaking raw TCP. Say hi: \n")
            .await;
        let _ = socket.shutdown().await;
    })
    .await
}

/// A site that answers 200 with a `Content-Length` larger than the bytes it
/// sends, waits `stall`, then closes the connection.
#[allow(dead_code)]
pub async fn start_truncated_site(stall: Duration) -> String {
    start_raw_site(move |mut socket| async move {
        let _ = read_request_path(&mut socket).await;
        let _ = socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nPresent")
            .await;
        tokio::time::sleep(stall).await;
        let _ = socket.shutdown().await;
    })
    .await
}

#[allow(dead_code)]
async fn start_raw_site<F, Fut>(f: F) -> String
where
    F: Fn(TcpStream) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(f(socket));
        }
    });

    format!("http://{}", addr)
}
