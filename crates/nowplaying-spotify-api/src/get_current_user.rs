use eyre::OptionExt;

use crate::client::SpotifyClient;
use crate::fetch::fetch;
use crate::user::PrivateUser;

/// https://developer.spotify.com/documentation/web-api/reference/get-current-users-profile
pub async fn get_current_user(client: &SpotifyClient) -> eyre::Result<PrivateUser> {
    fetch(client, "me")
        .await?
        .ok_or_eyre("Spotify returned no profile for the current user")
}
