//! Error types for playback synchronization

use encore_core::TrackId;
use thiserror::Error;

/// Playback errors
///
/// None of these are raised by state transitions themselves; transitions
/// absorb failures and report them as events instead.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The same track was supplied twice when building a queue
    #[error("Track {0} appears more than once in the queue")]
    DuplicateTrack(TrackId),

    /// A stream locator could not be built
    #[error("Invalid stream locator: {0}")]
    InvalidLocator(String),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The player service has shut down
    #[error("Player service is no longer running")]
    Disconnected,

    /// The player thread could not be started
    #[error("Failed to start player thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
