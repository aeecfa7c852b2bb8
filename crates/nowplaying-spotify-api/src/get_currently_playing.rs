use crate::client::SpotifyClient;
use crate::currently_playing::CurrentlyPlaying;
use crate::fetch::fetch;

/// https://developer.spotify.com/documentation/web-api/reference/get-the-users-currently-playing-track
///
/// `None` means nothing is playing.
pub async fn get_currently_playing(
    client: &SpotifyClient,
) -> eyre::Result<Option<CurrentlyPlaying>> {
    fetch(client, "me/player/currently-playing?additional_types=track,episode").await
}
