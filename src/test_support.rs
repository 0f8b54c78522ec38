//! In-process HTTP fixtures for exercising the release client.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::HttpConfig;

pub const LISTING_PATH: &str = "/apk/grindr-llc/grindr-gay-chat-meet-date/";
pub const DETAIL_PATH: &str = "/apk/grindr-llc/grindr-gay-chat-meet-date/grindr-25-3-0-release/";

type Route = (&'static str, u16, String);

/// Minimal HTTP/1.1 server answering fixed paths; anything else is a 404.
pub struct FixtureServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    task: JoinHandle<()>,
}

impl FixtureServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);

        let seen = requests.clone();
        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(stream, routes.clone(), seen.clone()));
            }
        });

        Self {
            addr,
            requests,
            task,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Paths requested so far, in arrival order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(mut stream: TcpStream, routes: Arc<Vec<Route>>, seen: Arc<Mutex<Vec<String>>>) {
    let Some(path) = read_request_path(&mut stream).await else {
        return;
    };
    seen.lock().await.push(path.clone());

    let (status, body) = routes
        .iter()
        .find(|(route, _, _)| *route == path)
        .map(|(_, status, body)| (*status, body.clone()))
        .unwrap_or((404, String::new()));
    let response = format!(
        "HTTP/1.1 {status} {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        reason(status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

async fn read_request_path(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..read]);
    }
    let head = String::from_utf8_lossy(&buf);
    let request_line = head.lines().next()?;
    request_line.split_whitespace().nth(1).map(str::to_string)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// HTTP settings for loopback fixtures: short timeout, proxies bypassed.
pub fn local_http_config() -> HttpConfig {
    HttpConfig {
        timeout: 5,
        system_proxy: false,
        ..HttpConfig::default()
    }
}

pub fn listing_html(release_href: &str) -> String {
    format!(
        r#"<html><body><div class="listWidget">
          <div class="appRow"><h5 class="appRowTitle wrapText"><a class="fontBlack" href="{release_href}">Grindr 25.3.0</a></h5></div>
        </div></body></html>"#
    )
}

pub fn detail_html(cell_text: &str) -> String {
    format!(
        r#"<html><body><div class="table topmargin variants-table">
          <div class="table-row headerFont"><div class="table-cell">Variant</div><div class="table-cell">Arch</div></div>
          <div class="table-row"><div class="table-cell">{cell_text}</div><div class="table-cell">arm64-v8a</div></div>
        </div></body></html>"#
    )
}
