//! Shared helpers for playback integration tests

#![allow(dead_code)]

use encore_core::{Track, TrackId, User};
use encore_playback::{
    Player, PlaybackError, Result, SignalSink, StreamEndpoint, TrackQueue, Transport,
};
use std::sync::{Arc, Mutex};
use url::Url;

/// Everything the player asked the device to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    Load(String),
    Play,
    Pause,
}

#[derive(Default)]
struct Recorded {
    calls: Vec<DeviceCall>,
    sinks: Vec<SignalSink>,
}

/// Mock transport that records calls and keeps every sink it was handed
///
/// Clones share the same recording, so tests keep one clone while the
/// player owns the other.
#[derive(Clone, Default)]
pub struct MockTransport {
    recorded: Arc<Mutex<Recorded>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.recorded.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.recorded.lock().unwrap().calls.clear();
    }

    /// Number of loads issued so far
    pub fn load_count(&self) -> usize {
        self.recorded.lock().unwrap().sinks.len()
    }

    /// Sink handed over with the most recent load
    pub fn last_sink(&self) -> SignalSink {
        self.recorded
            .lock()
            .unwrap()
            .sinks
            .last()
            .cloned()
            .expect("nothing loaded yet")
    }

    /// Sink handed over with the `n`th load (zero based)
    pub fn sink(&self, n: usize) -> SignalSink {
        self.recorded.lock().unwrap().sinks[n].clone()
    }
}

impl Transport for MockTransport {
    fn load(&mut self, locator: &Url, sink: SignalSink) {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.calls.push(DeviceCall::Load(locator.to_string()));
        recorded.sinks.push(sink);
    }

    fn play(&mut self) {
        self.recorded.lock().unwrap().calls.push(DeviceCall::Play);
    }

    fn pause(&mut self) {
        self.recorded.lock().unwrap().calls.push(DeviceCall::Pause);
    }
}

pub fn create_test_track(id: &str) -> Track {
    Track::new(id, format!("Track {}", id), User::new("Test Artist"))
}

pub fn create_test_queue(ids: &[&str]) -> TrackQueue {
    TrackQueue::from_tracks(ids.iter().map(|id| create_test_track(id))).unwrap()
}

pub fn endpoint() -> StreamEndpoint {
    StreamEndpoint::new("https://api.example.com", "test-client").unwrap()
}

pub fn stream_url(id: &str) -> String {
    format!(
        "https://api.example.com/tracks/{}/stream?client_id=test-client",
        id
    )
}

/// Player over `ids` plus a handle on its transport
pub fn create_player(ids: &[&str]) -> (Player, MockTransport) {
    let transport = MockTransport::new();
    let player = Player::new(transport.clone(), endpoint()).with_queue(create_test_queue(ids));
    (player, transport)
}

/// Locator that refuses one particular track
pub fn refusing_locator(bad: &'static str) -> impl Fn(&TrackId) -> Result<Url> + Send + Sync {
    move |id: &TrackId| {
        if id.as_str() == bad {
            Err(PlaybackError::InvalidLocator(format!("no stream for {}", id)))
        } else {
            Ok(Url::parse(&stream_url(id.as_str()))?)
        }
    }
}

pub fn current_id(player: &Player) -> Option<String> {
    player
        .state()
        .current_track()
        .map(|track| track.id.as_str().to_string())
}
