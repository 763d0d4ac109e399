/// Queue population from JSON track listings
use crate::error::{CliError, Result};
use encore_core::{Track, User};
use encore_playback::TrackQueue;
use std::fs;
use std::path::Path;

/// Read a JSON array of provider tracks into a queue
pub fn load_queue(path: &Path) -> Result<TrackQueue> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_queue(&contents)
}

/// Parse a JSON array of provider tracks
pub fn parse_queue(json: &str) -> Result<TrackQueue> {
    let tracks: Vec<Track> = serde_json::from_str(json)?;
    Ok(TrackQueue::from_tracks(tracks)?)
}

/// Small built-in queue used when no queue file is given
pub fn demo_queue() -> TrackQueue {
    let artist = User::new("Encore Demo").with_avatar("https://example.com/avatars/demo-large.jpg");
    let tracks = [
        ("1", "Opening Night"),
        ("2", "Second Act"),
        ("3", "Curtain Call (Extended Version With A Title Too Long To Show)"),
    ]
    .map(|(id, title)| Track::new(id, title, artist.clone()));

    TrackQueue::from_tracks(tracks).unwrap_or_default()
}
