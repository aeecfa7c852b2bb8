use base64::Engine;
use eyre::Result;
use rand::Rng;
use rand::distr::Alphanumeric;
use sha2::Digest;
use sha2::Sha256;
use url::Url;

use crate::config::Config;

const STATE_LEN: usize = 32;
const CODE_VERIFIER_LEN: usize = 128;

/// Per-handshake values that have to survive the browser round trip.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub state: String,
    pub redirect_uri: Url,
    pub code_verifier: Option<String>,
}

impl AuthSession {
    /// Fresh session with a random `state` nonce.
    pub fn new(config: &Config) -> Self {
        Self::with_state(config, random_alphanumeric(STATE_LEN))
    }

    pub fn with_state(config: &Config, state: impl Into<String>) -> Self {
        AuthSession {
            state: state.into(),
            redirect_uri: config.redirect_uri.clone(),
            code_verifier: config
                .uses_pkce()
                .then(|| random_alphanumeric(CODE_VERIFIER_LEN)),
        }
    }

    /// The URL the user opens to grant consent.
    pub fn consent_url(&self, config: &Config) -> Result<Url> {
        let scope = config.scopes.join(" ");
        let mut params = vec![
            ("client_id", config.client_id.clone()),
            ("response_type", "code".to_string()),
            ("redirect_uri", self.redirect_uri.to_string()),
            ("state", self.state.clone()),
            ("scope", scope),
        ];
        if let Some(verifier) = &self.code_verifier {
            params.push(("code_challenge_method", "S256".to_string()));
            params.push(("code_challenge", code_challenge(verifier)));
        }
        Ok(Url::parse_with_params(config.authorize_url.as_str(), &params)?)
    }
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hash)
}
