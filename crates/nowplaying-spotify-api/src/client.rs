use eyre::Result;
use url::Url;

use crate::token::Token;

/// Authenticated handle on the Web API.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: reqwest::Client,
    api_base_url: Url,
    token: Token,
}

impl SpotifyClient {
    pub fn new(api_base_url: Url, token: Token) -> Self {
        SpotifyClient {
            http: reqwest::Client::new(),
            api_base_url,
            token,
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Resolve an endpoint relative to the API base, e.g. `me/player`.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.api_base_url.join(path)?)
    }
}
