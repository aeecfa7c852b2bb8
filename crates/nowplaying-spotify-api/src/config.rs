use std::path::PathBuf;

use eyre::Result;
use eyre::eyre;
use url::Url;

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/callback";
pub const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const API_BASE_URL: &str = "https://api.spotify.com/v1/";
pub const TOKEN_FILE_NAME: &str = "spotify-display.json";
pub const SCOPES: &[&str] = &["user-read-private", "user-read-playback-state"];

/// Everything needed to authorize and talk to Spotify.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    /// Without a secret the client authorizes as a public client using PKCE.
    pub client_secret: Option<String>,
    pub redirect_uri: Url,
    pub authorize_url: Url,
    pub token_url: Url,
    pub api_base_url: Url,
    pub scopes: Vec<String>,
    pub token_path: PathBuf,
}

/// Read the required environment variable or error
fn var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| eyre!("Missing env var: {}", name))
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

impl Config {
    /// Spotify endpoints and defaults for everything but the client id.
    pub fn new(client_id: impl Into<String>) -> Result<Self> {
        Ok(Config {
            client_id: client_id.into(),
            client_secret: None,
            redirect_uri: Url::parse(DEFAULT_REDIRECT_URI)?,
            authorize_url: Url::parse(AUTHORIZE_URL)?,
            token_url: Url::parse(TOKEN_URL)?,
            api_base_url: Url::parse(API_BASE_URL)?,
            scopes: SCOPES.iter().map(|scope| scope.to_string()).collect(),
            token_path: std::env::temp_dir().join(TOKEN_FILE_NAME),
        })
    }

    /// Build the config from `SPOTIFY_*` variables. `.env` is loaded by
    /// `nowplaying_init::init`.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::new(var("SPOTIFY_CLIENT_ID")?)?;
        config.client_secret = optional_var("SPOTIFY_CLIENT_SECRET");
        if let Some(redirect_uri) = optional_var("SPOTIFY_REDIRECT_URI") {
            config.redirect_uri = Url::parse(&redirect_uri)
                .map_err(|e| eyre!("Invalid SPOTIFY_REDIRECT_URI {:?}: {}", redirect_uri, e))?;
        }
        if let Some(token_path) = optional_var("SPOTIFY_TOKEN_PATH") {
            config.token_path = PathBuf::from(token_path);
        }
        Ok(config)
    }

    pub fn uses_pkce(&self) -> bool {
        self.client_secret.is_none()
    }
}
