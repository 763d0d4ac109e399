//! Core types for playback synchronization

use encore_core::{Track, TrackId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::transport::LoadId;

/// A queued track plus display data precomputed for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// The track itself
    pub origin: Track,

    /// Precomputed waveform samples for rendering (optional)
    #[serde(default)]
    pub samples: Option<Vec<f32>>,
}

impl QueueEntry {
    /// Wrap a track without auxiliary data
    pub fn new(origin: Track) -> Self {
        Self {
            origin,
            samples: None,
        }
    }

    /// Attach waveform samples
    #[must_use]
    pub fn with_samples(mut self, samples: Vec<f32>) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Id of the wrapped track
    pub fn id(&self) -> &TrackId {
        &self.origin.id
    }
}

impl From<Track> for QueueEntry {
    fn from(origin: Track) -> Self {
        Self::new(origin)
    }
}

/// Direction of a queue step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Towards the end of the queue (+1)
    Forward,

    /// Towards the start of the queue (-1)
    Backward,
}

/// Coarse playback status, as shown by controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// No current track
    Empty,

    /// A current track exists but is not requested to play
    Paused,

    /// A current track is requested to play
    Playing,
}

/// Everything known about the current track
///
/// Position and duration belong to this track only; switching tracks
/// always starts a fresh session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    track: Track,
    position: Duration,
    duration: Duration,
    load: Option<LoadId>,
    ended: bool,
}

impl Session {
    pub(crate) fn new(track: Track) -> Self {
        Self {
            track,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            load: None,
            ended: false,
        }
    }

    /// The current track
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Last reported playback position
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Last reported duration (zero while unknown)
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Transport load backing this session, if the track has been loaded
    pub fn load(&self) -> Option<LoadId> {
        self.load
    }

    /// Whether the transport reported the end of this load
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub(crate) fn attach_load(&mut self, load: LoadId) {
        self.load = Some(load);
        self.position = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.ended = false;
    }

    pub(crate) fn detach_load(&mut self) {
        self.load = None;
    }

    pub(crate) fn mark_ended(&mut self) {
        self.ended = true;
        if !self.duration.is_zero() {
            self.position = self.duration;
        }
    }

    pub(crate) fn set_position(&mut self, position: Duration) {
        self.position = if self.duration.is_zero() {
            position
        } else {
            position.min(self.duration)
        };
    }

    pub(crate) fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
        if !duration.is_zero() && self.position > duration {
            self.position = duration;
        }
    }
}

/// Authoritative playback state
///
/// `Playing` always carries a track; there is no way to express
/// "playing nothing".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlaybackState {
    /// Nothing selected
    #[default]
    Empty,

    /// Track selected, playback not requested
    Paused(Session),

    /// Track selected, playback requested
    Playing(Session),
}

impl PlaybackState {
    /// Coarse status
    pub fn status(&self) -> PlaybackStatus {
        match self {
            PlaybackState::Empty => PlaybackStatus::Empty,
            PlaybackState::Paused(_) => PlaybackStatus::Paused,
            PlaybackState::Playing(_) => PlaybackStatus::Playing,
        }
    }

    /// Current session, if any
    pub fn session(&self) -> Option<&Session> {
        match self {
            PlaybackState::Empty => None,
            PlaybackState::Paused(session) | PlaybackState::Playing(session) => Some(session),
        }
    }

    pub(crate) fn session_mut(&mut self) -> Option<&mut Session> {
        match self {
            PlaybackState::Empty => None,
            PlaybackState::Paused(session) | PlaybackState::Playing(session) => Some(session),
        }
    }

    /// Current track, if any
    pub fn current_track(&self) -> Option<&Track> {
        self.session().map(Session::track)
    }

    /// Whether playback is requested
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing(_))
    }

    /// Position of the current track (zero when empty)
    pub fn position(&self) -> Duration {
        self.session().map_or(Duration::ZERO, Session::position)
    }

    /// Duration of the current track (zero when empty or unknown)
    pub fn duration(&self) -> Duration {
        self.session().map_or(Duration::ZERO, Session::duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_core::User;

    fn session() -> Session {
        Session::new(Track::new("1", "Track 1", User::new("artist")))
    }

    #[test]
    fn default_state_is_empty() {
        let state = PlaybackState::default();
        assert_eq!(state.status(), PlaybackStatus::Empty);
        assert!(!state.is_playing());
        assert!(state.current_track().is_none());
        assert_eq!(state.position(), Duration::ZERO);
    }

    #[test]
    fn position_is_clamped_once_duration_known() {
        let mut session = session();

        // Unknown duration: nothing to clamp against
        session.set_position(Duration::from_secs(500));
        assert_eq!(session.position(), Duration::from_secs(500));

        // Late duration pulls the position back
        session.set_duration(Duration::from_secs(180));
        assert_eq!(session.position(), Duration::from_secs(180));

        session.set_position(Duration::from_secs(200));
        assert_eq!(session.position(), Duration::from_secs(180));
    }

    #[test]
    fn mark_ended_moves_position_to_duration() {
        let mut session = session();
        session.set_duration(Duration::from_secs(90));
        session.set_position(Duration::from_secs(89));

        session.mark_ended();
        assert!(session.is_ended());
        assert_eq!(session.position(), Duration::from_secs(90));
    }
}
