//! Playback events
//!
//! Emitted by the player after every transition so renderers can follow
//! along without reading state on a timer:
//! - Status changes (empty/paused/playing)
//! - Track changes (skip, auto-advance, explicit selection)
//! - Position/duration updates from the transport
//! - End of track and transport failures

use encore_core::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::PlaybackStatus;

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback status changed
    StateChanged {
        /// The new status
        status: PlaybackStatus,
    },

    /// A different track became current
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Position or duration of the current track changed
    PositionChanged {
        /// Current playback position
        position_ms: u64,
        /// Total track duration (0 while unknown)
        duration_ms: u64,
    },

    /// Track finished playing naturally (reached end)
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Queue contents were replaced
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// The transport could not play the current track
    TransportFailed {
        /// ID of the track that failed
        track_id: TrackId,
        /// Failure description
        message: String,
    },
}

impl PlaybackEvent {
    pub(crate) fn position(position: Duration, duration: Duration) -> Self {
        PlaybackEvent::PositionChanged {
            position_ms: saturating_millis(position),
            duration_ms: saturating_millis(duration),
        }
    }
}

fn saturating_millis(time: Duration) -> u64 {
    u64::try_from(time.as_millis()).unwrap_or(u64::MAX)
}
