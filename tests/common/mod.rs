//! In-process HTTP stub serving canned market-data responses.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Route status that closes the connection without answering.
pub const DROP_CONNECTION: u16 = 0;

#[derive(Clone)]
struct Route {
    prefix: String,
    status: u16,
    body: String,
}

/// Serves the first route whose prefix matches the request path; 404 otherwise.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(routes: &[(&str, u16, &str)]) -> Self {
        let routes: Vec<Route> = routes
            .iter()
            .map(|(prefix, status, body)| Route {
                prefix: prefix.to_string(),
                status: *status,
                body: body.to_string(),
            })
            .collect();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let routes = routes.clone();
                let log = log.clone();
                tokio::spawn(async move {
                    let head = read_head(&mut socket).await;
                    let path = head
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or("/")
                        .to_string();
                    log.lock().unwrap().push(head);

                    let (status, body) = routes
                        .iter()
                        .find(|r| path.starts_with(&r.prefix))
                        .map(|r| (r.status, r.body.clone()))
                        .unwrap_or((404, String::new()));
                    if status == DROP_CONNECTION {
                        let _ = socket.shutdown().await;
                        return;
                    }
                    let response = format!(
                        "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { base_url, requests }
    }

    /// Raw request heads received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// A base URL nothing listens on.
pub async fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1", addr)
}

pub const BTC_USD_RATE: &str = r#"{
    "time": "2024-01-15T10:00:00.0000000Z",
    "asset_id_base": "BTC",
    "asset_id_quote": "USD",
    "rate": 42000.5
}"#;
