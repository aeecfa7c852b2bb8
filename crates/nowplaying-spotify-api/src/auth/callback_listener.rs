use std::net::SocketAddr;
use std::sync::Arc;

use eyre::OptionExt;
use eyre::Result;
use eyre::WrapErr;
use http::StatusCode;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::sync::oneshot;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;
use url::Url;

use crate::auth::error::HandshakeError;
use crate::auth::exchange::exchange_code;
use crate::auth::session::AuthSession;
use crate::config::Config;
use crate::token::Token;

const MAX_REQUEST_HEAD: usize = 8 * 1024;

pub type HandshakeResult = Result<Token, HandshakeError>;

const SUCCESS_BODY: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head><meta charset="UTF-8"><title>Spotify Auth</title></head>
  <body style="font-family:sans-serif;text-align:center;padding-top:3em">
    <h1>nowplaying</h1>
    <strong>Spotify auth complete.</strong><br/>You may close this window.
  </body>
</html>
"#;

/// Local endpoint that receives the OAuth redirect.
///
/// Bound up front so a busy port fails the run before the user is sent to
/// the consent page.
#[derive(Debug)]
pub struct CallbackListener {
    listener: TcpListener,
    base: Url,
}

impl CallbackListener {
    pub async fn bind(redirect_uri: &Url) -> Result<Self> {
        let host = redirect_uri
            .host_str()
            .ok_or_eyre("Redirect URI has no host")?;
        let port = redirect_uri
            .port_or_known_default()
            .ok_or_eyre("Redirect URI has no port")?;
        let listener = TcpListener::bind((host, port))
            .await
            .wrap_err_with(|| format!("Failed to listen on {}:{}", host, port))?;
        debug!("Listening for code on {}", redirect_uri);
        Ok(CallbackListener {
            listener,
            base: redirect_uri.clone(),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve on a background task. The receiver yields exactly one outcome.
    ///
    /// The task is never joined; it keeps answering stray requests until the
    /// process exits.
    pub fn spawn(
        self,
        config: Arc<Config>,
        session: AuthSession,
    ) -> oneshot::Receiver<HandshakeResult> {
        let (tx, rx) = oneshot::channel();
        let redirect = Arc::new(Redirect {
            base: self.base.clone(),
            config,
            session,
            handoff: Mutex::new(Some(tx)),
        });
        tokio::spawn(self.serve(redirect));
        rx
    }

    /// Each connection gets its own task so a socket that never sends a
    /// request (browser preconnects) cannot hold up the redirect.
    async fn serve(self, redirect: Arc<Redirect>) {
        loop {
            let (mut socket, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    continue;
                }
            };
            let redirect = redirect.clone();
            tokio::spawn(async move {
                if let Err(e) = redirect.handle(&mut socket).await {
                    warn!(%peer, "Callback connection failed: {:#}", e);
                }
            });
        }
    }
}

/// State shared by the connection tasks of one handshake.
struct Redirect {
    base: Url,
    config: Arc<Config>,
    session: AuthSession,
    handoff: Mutex<Option<oneshot::Sender<HandshakeResult>>>,
}

impl Redirect {
    async fn handle(&self, socket: &mut TcpStream) -> Result<()> {
        let head = read_request_head(socket).await?;
        let Some(target) = request_target(&head) else {
            debug!("Ignoring empty or malformed request");
            return Ok(());
        };
        let url = Url::options()
            .base_url(Some(&self.base))
            .parse(target)
            .wrap_err_with(|| format!("Bad request target {:?}", target))?;

        if url.path() != self.base.path() {
            info!("Got request for: {}", target);
            return respond(socket, StatusCode::OK, "").await;
        }

        let tx = self.handoff.lock().await.take();
        let Some(tx) = tx else {
            warn!("Callback hit after the handshake already finished");
            return respond(socket, StatusCode::GONE, "Authorization already completed.").await;
        };

        let outcome = complete(&self.config, &self.session, &url).await;
        let written = match &outcome {
            Ok(_) => respond(socket, StatusCode::OK, SUCCESS_BODY).await,
            Err(e) => {
                error!("{}", e);
                let status = e.status();
                respond(socket, status, status.canonical_reason().unwrap_or_default()).await
            }
        };
        if tx.send(outcome).is_err() {
            warn!("Nobody is waiting for the handshake result");
        }
        written
    }
}

/// Validate the redirect and exchange its code. `state` is checked before
/// anything is sent to the token endpoint.
async fn complete(config: &Config, session: &AuthSession, url: &Url) -> HandshakeResult {
    let param = |name: &str| {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    };

    let received = param("state");
    if received.as_deref() != Some(session.state.as_str()) {
        return Err(HandshakeError::StateMismatch {
            expected: session.state.clone(),
            received,
        });
    }
    if let Some(reason) = param("error") {
        return Err(HandshakeError::Denied(reason));
    }
    let code = param("code").ok_or(HandshakeError::MissingCode)?;

    exchange_code(config, session, &code)
        .await
        .map_err(HandshakeError::Exchange)
}

async fn read_request_head(socket: &mut TcpStream) -> Result<String> {
    let mut buffer = Vec::with_capacity(1024);
    let mut chunk = [0; 1024];
    loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
        if buffer.windows(4).any(|w| w == b"\r\n\r\n") || buffer.len() >= MAX_REQUEST_HEAD {
            break;
        }
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// The target of a `GET` request line, e.g. `/callback?code=..`.
fn request_target(head: &str) -> Option<&str> {
    let mut parts = head.lines().next()?.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    (method.eq_ignore_ascii_case("GET") && target.starts_with('/')).then_some(target)
}

async fn respond(socket: &mut TcpStream, status: StatusCode, body: &str) -> Result<()> {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default(),
        body.len(),
        body
    );
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await?;
    Ok(())
}
