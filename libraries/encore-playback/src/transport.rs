//! Transport adapter
//!
//! A [`Transport`] is whatever actually makes sound: an HTML audio element,
//! a native media player, a simulated clock in tests. It is commanded with
//! `load`/`play`/`pause` and reports back through the [`SignalSink`] it was
//! handed for the load in question. Every signal carries the [`LoadId`] of
//! that load, which lets the player drop reports from resources it has
//! already moved away from.

use crossbeam_channel::Sender;
use encore_core::TrackId;
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::Result;
use crate::locator::LocatorBuilder;
use crate::player::PlayerInput;

/// Identifies one `load()` call on the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadId(u64);

impl LoadId {
    /// Raw counter value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

/// Normalized transport report
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Current playback position
    TimeAdvanced(Duration),

    /// Total duration of the loaded resource (may be revised)
    DurationKnown(Duration),

    /// Playback reached the end of the resource
    Ended,

    /// The resource could not be loaded or decoded
    Failed(String),
}

/// A signal together with the load that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedSignal {
    /// Load the signal belongs to
    pub load: LoadId,

    /// The signal
    pub signal: Signal,
}

/// Audio device capability set
///
/// Commands are fire-and-forget: the device confirms nothing directly and
/// its actual state is only observable through later signals.
pub trait Transport: Send {
    /// Prepare `locator` for playback, replacing whatever was loaded
    ///
    /// Signals for this resource must be reported through `sink`. Sinks
    /// from earlier loads may still be used; their signals are discarded.
    fn load(&mut self, locator: &Url, sink: SignalSink);

    /// Start or resume the loaded resource
    fn play(&mut self);

    /// Pause the loaded resource
    fn pause(&mut self);
}

/// Per-load reporting channel handed to the transport
///
/// Converts raw device values (seconds as `f64`) into [`Signal`]s.
/// NaN and negative values (including negative infinity) become zero and
/// values too large for a [`Duration`] saturate. Positive infinity is
/// dropped, since live streams report it as their duration.
#[derive(Debug, Clone)]
pub struct SignalSink {
    load: LoadId,
    tx: Sender<PlayerInput>,
}

impl SignalSink {
    pub(crate) fn new(load: LoadId, tx: Sender<PlayerInput>) -> Self {
        Self { load, tx }
    }

    /// Load this sink reports for
    pub fn load(&self) -> LoadId {
        self.load
    }

    /// Report the current position in seconds
    pub fn time_advanced(&self, seconds: f64) {
        if let Some(position) = normalize_seconds(seconds) {
            self.emit(Signal::TimeAdvanced(position));
        }
    }

    /// Report the total duration in seconds
    pub fn duration_known(&self, seconds: f64) {
        if let Some(duration) = normalize_seconds(seconds) {
            self.emit(Signal::DurationKnown(duration));
        }
    }

    /// Report end of media
    pub fn ended(&self) {
        self.emit(Signal::Ended);
    }

    /// Report a load or decode failure
    pub fn failed(&self, reason: impl Into<String>) {
        self.emit(Signal::Failed(reason.into()));
    }

    fn emit(&self, signal: Signal) {
        let input = PlayerInput::Signal(TaggedSignal {
            load: self.load,
            signal,
        });

        if self.tx.send(input).is_err() {
            trace!(load = %self.load, "Player gone, dropping transport signal");
        }
    }
}

fn normalize_seconds(seconds: f64) -> Option<Duration> {
    if seconds.is_nan() || seconds <= 0.0 {
        return Some(Duration::ZERO);
    }
    if seconds.is_infinite() {
        return None;
    }
    Some(Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX))
}

/// Owns the transport and the bookkeeping around it
///
/// Issues a fresh [`LoadId`] per load, which implicitly supersedes any load
/// still in flight.
pub struct TransportAdapter {
    device: Box<dyn Transport>,
    locator: Box<dyn LocatorBuilder>,
    signals: Sender<PlayerInput>,
    last_load: u64,
    current: Option<LoadId>,
}

impl TransportAdapter {
    pub(crate) fn new(
        device: Box<dyn Transport>,
        locator: Box<dyn LocatorBuilder>,
        signals: Sender<PlayerInput>,
    ) -> Self {
        Self {
            device,
            locator,
            signals,
            last_load: 0,
            current: None,
        }
    }

    /// Load the stream for `track_id`
    ///
    /// On failure nothing is loaded afterwards; a previously loaded
    /// resource is paused so it cannot keep playing unattended.
    pub fn load(&mut self, track_id: &TrackId) -> Result<LoadId> {
        let locator = match self.locator.build_locator(track_id) {
            Ok(locator) => locator,
            Err(e) => {
                warn!(track_id = %track_id, error = %e, "Could not build stream locator");
                if self.current.take().is_some() {
                    self.device.pause();
                }
                return Err(e);
            }
        };

        self.last_load += 1;
        let load = LoadId(self.last_load);
        debug!(track_id = %track_id, load = %load, url = %locator, "Loading track");

        self.device
            .load(&locator, SignalSink::new(load, self.signals.clone()));
        self.current = Some(load);
        Ok(load)
    }

    /// Ask the device to play
    pub fn play(&mut self) {
        match self.current {
            Some(load) => {
                debug!(load = %load, "Transport play");
                self.device.play();
            }
            None => warn!("Transport play requested with nothing loaded"),
        }
    }

    /// Ask the device to pause
    pub fn pause(&mut self) {
        if let Some(load) = self.current {
            debug!(load = %load, "Transport pause");
            self.device.pause();
        }
    }

    /// Most recent successful load
    pub fn current_load(&self) -> Option<LoadId> {
        self.current
    }
}

impl fmt::Debug for TransportAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportAdapter")
            .field("last_load", &self.last_load)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
