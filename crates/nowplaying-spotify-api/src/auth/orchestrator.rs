use std::io::Write;
use std::sync::Arc;

use eyre::Result;
use eyre::WrapErr;
use eyre::eyre;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::auth::callback_listener::CallbackListener;
use crate::auth::session::AuthSession;
use crate::auth::token_store::TokenStore;
use crate::client::SpotifyClient;
use crate::config::Config;
use crate::get_current_user::get_current_user;
use crate::get_currently_playing::get_currently_playing;
use crate::now_playing::Header;
use crate::now_playing::Playback;
use crate::token::Token;

/// Gets a token from the cache or the browser, then reports what is playing.
#[derive(Debug)]
pub struct AuthOrchestrator {
    config: Arc<Config>,
    store: TokenStore,
    fixed_state: Option<String>,
}

impl AuthOrchestrator {
    pub fn new(config: Config) -> Self {
        let store = TokenStore::new(&config.token_path);
        AuthOrchestrator {
            config: Arc::new(config),
            store,
            fixed_state: None,
        }
    }

    /// Use a known `state` nonce instead of a random one.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.fixed_state = Some(state.into());
        self
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Cached token if there is a usable one, otherwise the browser handshake.
    ///
    /// Blocks until the callback delivers; there is no timeout.
    pub async fn authenticate(&self, out: &mut impl Write) -> Result<Token> {
        debug!("Getting token");
        match self.store.load().await {
            Ok(token) => {
                if token.is_expired() {
                    warn!(expiry = %token.expiry, "Saved token has expired, requests may be rejected");
                }
                return Ok(token);
            }
            Err(e) => info!("No usable saved token ({}), authorizing", e),
        }

        let session = match &self.fixed_state {
            Some(state) => AuthSession::with_state(&self.config, state.clone()),
            None => AuthSession::new(&self.config),
        };
        let consent_url = session.consent_url(&self.config)?;

        let listener = CallbackListener::bind(&session.redirect_uri).await?;
        let handoff = listener.spawn(self.config.clone(), session);

        writeln!(
            out,
            "Please log in to Spotify by visiting the following page in your browser: {}",
            consent_url
        )?;
        out.flush()?;

        let token = handoff
            .await
            .map_err(|_| eyre!("Callback listener stopped before delivering a token"))??;
        info!("Authorization complete");
        Ok(token)
    }

    /// The whole program: authenticate, print the summary, persist the token.
    pub async fn run(&self, out: &mut impl Write) -> Result<()> {
        let token = self.authenticate(out).await?;
        let client = SpotifyClient::new(self.config.api_base_url.clone(), token);

        match get_current_user(&client).await {
            Ok(user) => write!(out, "{}", Header(&user))?,
            Err(e) => report(out, "Failed to get current user", &e)?,
        }
        match get_currently_playing(&client).await {
            Ok(playing) => write!(out, "{}", Playback(playing.as_ref()))?,
            Err(e) => report(out, "Failed to get currently playing", &e)?,
        }

        self.store
            .save(client.token())
            .await
            .wrap_err("Failed to save token")?;
        Ok(())
    }
}

/// Query failures are not fatal; log them and tell the user.
fn report(out: &mut impl Write, what: &str, e: &eyre::Report) -> Result<()> {
    error!("{}: {:#}", what, e);
    writeln!(out, "{}: {:#}", what, e)?;
    Ok(())
}
