#![allow(dead_code)]
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use http::StatusCode;
use nowplaying_spotify_api::config::Config;
use rand::Rng;
use rand::distr::Alphanumeric;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use url::Url;

pub const STATE: &str = "abc123";

/// A request as seen by the stub.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub head: String,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
    }
}

#[derive(Debug, Clone)]
struct Route {
    path: String,
    status: u16,
    body: String,
}

/// Canned HTTP responses keyed by path, standing in for the accounts
/// service and the Web API.
#[derive(Debug, Clone)]
pub struct Stub {
    pub base: Url,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Stub {
    pub async fn spawn(routes: &[(&str, u16, String)]) -> Stub {
        let routes: Arc<Vec<Route>> = Arc::new(
            routes
                .iter()
                .map(|(path, status, body)| Route {
                    path: path.to_string(),
                    status: *status,
                    body: body.clone(),
                })
                .collect(),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    continue;
                };
                let routes = routes.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    serve_one(socket, &routes, &recorded).await;
                });
            }
        });

        Stub {
            base: Url::parse(&format!("http://{}/", addr)).unwrap(),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

async fn serve_one(mut socket: TcpStream, routes: &[Route], recorded: &Mutex<Vec<Recorded>>) {
    let mut buffer = Vec::new();
    let mut chunk = [0; 4096];
    let head_end = loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..head_end]).into_owned();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    while buffer.len() < head_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buffer[head_end..]).into_owned();

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let target = request_line.next().unwrap_or_default();
    let path = target.split('?').next().unwrap_or_default().to_string();

    recorded.lock().unwrap().push(Recorded {
        method,
        path: path.clone(),
        head: head.clone(),
        body,
    });

    let (status, body) = routes
        .iter()
        .find(|route| route.path == path)
        .map(|route| (route.status, route.body.clone()))
        .unwrap_or((404, String::new()));
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

pub fn token_json(access_token: &str) -> String {
    serde_json::json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "scope": "user-read-private user-read-playback-state",
        "expires_in": 3600,
        "refresh_token": "stub-refresh"
    })
    .to_string()
}

pub fn user_json() -> String {
    serde_json::json!({
        "id": "wizzler",
        "display_name": "Wizzler",
        "country": "SE",
        "product": "premium",
        "type": "user"
    })
    .to_string()
}

pub fn playing_json() -> String {
    serde_json::json!({
        "timestamp": 1717171717000u64,
        "progress_ms": 83000,
        "is_playing": true,
        "currently_playing_type": "track",
        "item": {
            "type": "track",
            "id": "4uLU6hMCjMI75M1A2tKUQC",
            "name": "Never Gonna Give You Up",
            "duration_ms": 213573,
            "is_local": false,
            "uri": "spotify:track:4uLU6hMCjMI75M1A2tKUQC",
            "external_urls": { "spotify": "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC" },
            "artists": [{ "id": "0gxyHStUsqpMadRV0Di1Qt", "name": "Rick Astley" }],
            "album": { "id": "6N9PS4QXF1D0OWPk0Sxtb4", "name": "Whenever You Need Somebody", "images": [] }
        }
    })
    .to_string()
}

/// Accounts and API routes answering like a healthy Spotify.
pub fn happy_routes() -> Vec<(&'static str, u16, String)> {
    vec![
        ("/api/token", 200, token_json("stub-access")),
        ("/v1/me", 200, user_json()),
        ("/v1/me/player/currently-playing", 200, playing_json()),
    ]
}

pub fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

pub fn scratch_dir() -> PathBuf {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect();
    let dir = std::env::temp_dir().join(format!("nowplaying-it-{suffix}"));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Config whose redirect, accounts and API endpoints are all local.
pub fn test_config(stub: &Stub, callback_port: u16, token_path: PathBuf) -> Config {
    let mut config = Config::new("test-client").unwrap();
    config.client_secret = Some("test-secret".to_string());
    config.redirect_uri = Url::parse(&format!("http://127.0.0.1:{}/callback", callback_port)).unwrap();
    config.token_url = stub.base.join("api/token").unwrap();
    config.api_base_url = stub.base.join("v1/").unwrap();
    config.token_path = token_path;
    config
}

pub fn callback_url(port: u16, query: &str) -> String {
    format!("http://127.0.0.1:{}/callback?{}", port, query)
}

/// GET once the listener accepts connections.
pub async fn get_when_listening(url: &str) -> reqwest::Response {
    for _ in 0..500 {
        match reqwest::get(url).await {
            Ok(response) => return response,
            Err(e) if e.is_connect() => tokio::time::sleep(Duration::from_millis(10)).await,
            Err(e) => panic!("request to {} failed: {}", url, e),
        }
    }
    panic!("nothing listening at {}", url);
}
