use std::fmt;

use crate::currently_playing::CurrentlyPlaying;
use crate::currently_playing::PlayingItem;
use crate::user::PrivateUser;

/// First line of the summary, `Now Playing for <name> [<id>]`.
#[derive(Debug, Clone, Copy)]
pub struct Header<'a>(pub &'a PrivateUser);

impl fmt::Display for Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Now Playing for {} [{}]", self.0.name(), self.0.id)
    }
}

/// What is playing, or `Nothing playing...` when paused or idle.
#[derive(Debug, Clone, Copy)]
pub struct Playback<'a>(pub Option<&'a CurrentlyPlaying>);

impl fmt::Display for Playback<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((playing, item)) = self
            .0
            .filter(|playing| playing.is_playing)
            .and_then(|playing| playing.item.as_ref().map(|item| (playing, item)))
        else {
            return writeln!(f, "Nothing playing...");
        };

        writeln!(f)?;
        match item {
            PlayingItem::Track(track) => {
                writeln!(f, "{}", track.album.name)?;
                writeln!(f, "{}", track.name)?;
                let artists = track
                    .artists
                    .iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(f, "{}", artists)?;
            }
            PlayingItem::Episode(episode) => {
                writeln!(f, "{}", episode.show.name)?;
                writeln!(f, "{}", episode.name)?;
                writeln!(f, "{}", episode.show.publisher)?;
            }
        }
        if let Some(progress) = playing.progress_ms {
            writeln!(
                f,
                "{} / {}",
                clock(progress),
                clock(item.duration_ms())
            )?;
        }
        Ok(())
    }
}

/// `m:ss` from milliseconds.
fn clock(ms: i64) -> String {
    let secs = ms.max(0) / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}
