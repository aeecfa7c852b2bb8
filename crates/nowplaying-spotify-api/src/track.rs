use serde::Deserialize;
use serde::Serialize;

/// Track object as embedded in playback responses.
///
/// Local files come back with most ids and urls missing, hence the options
/// and defaults.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub album: Album,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(rename = "duration_ms")]
    pub duration_ms: i64,
    #[serde(default)]
    pub explicit: bool,
    #[serde(rename = "external_urls", default)]
    pub external_urls: ExternalUrls,
    pub id: Option<String>,
    pub name: String,
    pub uri: Option<String>,
    #[serde(rename = "is_local", default)]
    pub is_local: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(rename = "release_date")]
    pub release_date: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<i64>,
    pub width: Option<i64>,
}

/// Podcast episode, the other thing that can be playing.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "duration_ms")]
    pub duration_ms: i64,
    #[serde(default)]
    pub show: Show,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub publisher: String,
}
