use http::StatusCode;

use crate::client::SpotifyClient;

/// GET a JSON resource. `None` when Spotify answers with no content.
pub async fn fetch<T>(client: &SpotifyClient, path: &str) -> eyre::Result<Option<T>>
where
    T: serde::de::DeserializeOwned,
{
    let url = client.endpoint(path)?;
    let res = client
        .http()
        .get(url)
        .bearer_auth(&client.token().access_token)
        .send()
        .await?
        .error_for_status()?;
    if res.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    let res = res.text().await?;
    if res.trim().is_empty() {
        return Ok(None);
    }

    match serde_json::from_str(&res) {
        Ok(x) => Ok(Some(x)),
        Err(e) => Err(eyre::Error::new(e).wrap_err(format!("Failed to deserialize:\n{}", res))),
    }
}
