use eyre::Result;
use eyre::bail;
use time::OffsetDateTime;
use tracing::debug;

use crate::auth::session::AuthSession;
use crate::config::Config;
use crate::token::Token;
use crate::token::TokenResponse;

/// Trade an authorization code for a token at the token endpoint.
pub async fn exchange_code(config: &Config, session: &AuthSession, code: &str) -> Result<Token> {
    let redirect_uri = session.redirect_uri.to_string();
    let mut form = vec![
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", redirect_uri.as_str()),
    ];

    let client = reqwest::Client::new();
    let mut request = client.post(config.token_url.clone());
    match (&config.client_secret, &session.code_verifier) {
        (Some(secret), _) => {
            request = request.basic_auth(&config.client_id, Some(secret));
        }
        (None, Some(verifier)) => {
            form.push(("client_id", config.client_id.as_str()));
            form.push(("code_verifier", verifier.as_str()));
        }
        (None, None) => bail!("No client secret or PKCE verifier to authenticate the exchange"),
    }

    let res = request.form(&form).send().await?;
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        bail!("Token endpoint returned {}: {}", status, body.trim());
    }
    let resp = res.json::<TokenResponse>().await?;

    debug!("Access Token: len={}", resp.access_token.len());
    debug!("Scope: {}", resp.scope);
    debug!("Expires in: {}s", resp.expires_in);

    let token = Token::from_response(resp, OffsetDateTime::now_utc());
    if !token.is_complete() {
        bail!("Token endpoint returned an empty access token");
    }
    Ok(token)
}
