use serde::Deserialize;
use serde::Serialize;

use crate::track::Episode;
use crate::track::Track;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentlyPlaying {
    pub timestamp: i64,
    #[serde(rename = "progress_ms")]
    pub progress_ms: Option<i64>,
    #[serde(rename = "is_playing")]
    pub is_playing: bool,
    pub item: Option<PlayingItem>,
    #[serde(rename = "currently_playing_type")]
    pub currently_playing_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlayingItem {
    Track(Track),
    Episode(Episode),
}

impl PlayingItem {
    pub fn duration_ms(&self) -> i64 {
        match self {
            PlayingItem::Track(track) => track.duration_ms,
            PlayingItem::Episode(episode) => episode.duration_ms,
        }
    }
}
