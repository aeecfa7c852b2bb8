use serde::Deserialize;
use serde::Serialize;
use time::Duration;
use time::OffsetDateTime;

/// OAuth2 token as persisted between runs.
///
/// The on-disk shape matches the common `oauth2` token JSON:
/// `access_token`, `token_type`, `refresh_token` and an RFC 3339 `expiry`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expiry: OffsetDateTime,
}

impl Token {
    /// A token is only usable with a credential in it.
    pub fn is_complete(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Expiry is informational; nothing refreshes the token.
    pub fn is_expired(&self) -> bool {
        self.expiry <= OffsetDateTime::now_utc()
    }

    pub(crate) fn from_response(response: TokenResponse, now: OffsetDateTime) -> Self {
        let lifetime = i64::try_from(response.expires_in).unwrap_or(i64::MAX);
        Token {
            access_token: response.access_token,
            token_type: response.token_type,
            refresh_token: response.refresh_token.unwrap_or_default(),
            expiry: now.saturating_add(Duration::seconds(lifetime)),
        }
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &format_args!("<{} bytes>", self.access_token.len()))
            .field("token_type", &self.token_type)
            .field("refresh_token", &format_args!("<{} bytes>", self.refresh_token.len()))
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// https://developer.spotify.com/documentation/web-api/tutorials/code-flow
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
    pub expires_in: u64,
    pub refresh_token: Option<String>,
}
