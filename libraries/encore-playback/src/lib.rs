//! Encore - Playback Control
//!
//! Platform-agnostic playback controller for a streaming music client.
//!
//! This crate provides:
//! - An ordered, duplicate-free track queue with neighbor navigation
//! - A transport abstraction (load/play/pause) with per-load signal tagging
//! - The playback state machine (empty, paused, playing)
//! - A threaded service exposing play/pause/next/previous to any caller
//! - Display helpers (`MM:SS` times, title truncation, cover art)
//!
//! # Architecture
//!
//! `encore-playback` never touches an audio device directly. Platform code
//! implements [`Transport`] and reports what the device does through the
//! [`SignalSink`] it receives with each load. Commands and signals flow
//! into the [`Player`] over one channel and are applied strictly in order.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use encore_core::{Track, TrackId, User};
//! use encore_playback::{Player, SignalSink, StreamEndpoint, TrackQueue, Transport};
//! use url::Url;
//!
//! struct Speaker;
//!
//! impl Transport for Speaker {
//!     fn load(&mut self, _locator: &Url, sink: SignalSink) {
//!         sink.duration_known(215.0);
//!     }
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//! }
//!
//! let endpoint = StreamEndpoint::new("https://api.example.com", "client-id").unwrap();
//! let queue = TrackQueue::from_tracks(vec![
//!     Track::new("1", "First", User::new("artist")),
//!     Track::new("2", "Second", User::new("artist")),
//! ])
//! .unwrap();
//!
//! let mut player = Player::new(Speaker, endpoint).with_queue(queue);
//! player.play_track(&TrackId::new("1"));
//! player.process_pending();
//!
//! assert!(player.state().is_playing());
//! assert_eq!(player.state().duration().as_secs(), 215);
//!
//! player.next();
//! assert_eq!(player.state().current_track().unwrap().id.as_str(), "2");
//! ```
//!
//! # Example: Threaded Service
//!
//! ```rust,no_run
//! use encore_playback::{Player, PlayerService, PlaybackEvent};
//! # use encore_playback::{SignalSink, StreamEndpoint, Transport};
//! # struct Speaker;
//! # impl Transport for Speaker {
//! #     fn load(&mut self, _: &url::Url, _: SignalSink) {}
//! #     fn play(&mut self) {}
//! #     fn pause(&mut self) {}
//! # }
//! # let endpoint = StreamEndpoint::new("https://api.example.com", "id").unwrap();
//!
//! let service = PlayerService::spawn(Player::new(Speaker, endpoint))?;
//! let controls = service.handle();
//!
//! controls.play_track("1")?;
//! for event in service.events() {
//!     if let PlaybackEvent::TrackFinished { track_id } = event {
//!         println!("finished {}", track_id);
//!     }
//! }
//! # Ok::<(), encore_playback::PlaybackError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod events;
pub mod format;
mod locator;
mod player;
mod queue;
mod service;
mod transport;
pub mod types;

pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use format::{cover_art_url, format_time, truncate_title, TITLE_MAX_CHARS};
pub use locator::{LocatorBuilder, StreamEndpoint};
pub use player::{Command, Player, PlayerInput};
pub use queue::TrackQueue;
pub use service::{PlayerHandle, PlayerService};
pub use transport::{LoadId, Signal, SignalSink, TaggedSignal, Transport, TransportAdapter};
pub use types::{Direction, PlaybackState, PlaybackStatus, QueueEntry, Session};
