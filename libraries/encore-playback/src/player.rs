//! Playback state machine - core orchestration
//!
//! Reconciles user commands with transport signals against the queue and
//! owns the authoritative [`PlaybackState`]:
//!
//! ```text
//!            Play                    Pause
//!   Empty ─────────▶ (no-op)   Playing ─────▶ Paused
//!   Paused ────────▶ Playing   Paused  ─────▶ (no-op)
//!
//!   Next / Previous / Ended ──▶ TrackQueue::neighbor ──▶ new session or no-op
//! ```
//!
//! Every input is processed to completion before the next one is looked at.

use crossbeam_channel::{unbounded, Receiver, Sender};
use encore_core::{Track, TrackId};
use tracing::{debug, info, warn};

use crate::events::PlaybackEvent;
use crate::locator::LocatorBuilder;
use crate::queue::TrackQueue;
use crate::transport::{Signal, TaggedSignal, Transport, TransportAdapter};
use crate::types::{Direction, PlaybackState, PlaybackStatus, Session};

/// User-facing playback commands
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start or resume the current track
    Play,

    /// Pause the current track
    Pause,

    /// Pause when playing, play otherwise
    Toggle,

    /// Skip to the next queued track
    Next,

    /// Go back to the previous queued track
    Previous,

    /// Make a queued track current and play it
    PlayTrack(TrackId),

    /// Replace the queue contents
    ReplaceQueue(TrackQueue),
}

/// Anything the player reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerInput {
    /// Request from a user-facing surface
    Command(Command),

    /// Report from the transport
    Signal(TaggedSignal),
}

impl From<Command> for PlayerInput {
    fn from(command: Command) -> Self {
        PlayerInput::Command(command)
    }
}

/// Playback state machine
///
/// Owns the transport, the queue and the only mutable copy of
/// [`PlaybackState`]. Transport signals arrive on the player's own input
/// channel; call [`Player::process_pending`] (or run a
/// [`PlayerService`](crate::PlayerService)) to apply them.
pub struct Player {
    state: PlaybackState,
    queue: TrackQueue,
    transport: TransportAdapter,

    // Input channel shared with every signal sink
    input_tx: Sender<PlayerInput>,
    inputs: Receiver<PlayerInput>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl Player {
    /// Create a player driving `device`, resolving streams with `locator`
    pub fn new(
        device: impl Transport + 'static,
        locator: impl LocatorBuilder + 'static,
    ) -> Self {
        let (input_tx, inputs) = unbounded();
        let transport = TransportAdapter::new(Box::new(device), Box::new(locator), input_tx.clone());

        Self {
            state: PlaybackState::Empty,
            queue: TrackQueue::default(),
            transport,
            input_tx,
            inputs,
            pending_events: Vec::new(),
        }
    }

    /// Start with `queue` already in place
    #[must_use]
    pub fn with_queue(mut self, queue: TrackQueue) -> Self {
        self.queue = queue;
        self
    }

    // ===== Inputs =====

    /// Apply one input
    ///
    /// Never fails: impossible requests are no-ops and transport problems
    /// become [`PlaybackEvent::TransportFailed`].
    pub fn handle(&mut self, input: PlayerInput) {
        match input {
            PlayerInput::Command(command) => self.handle_command(command),
            PlayerInput::Signal(signal) => self.handle_signal(signal),
        }
    }

    /// Apply one command
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::Toggle => self.toggle(),
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::PlayTrack(track_id) => self.play_track(&track_id),
            Command::ReplaceQueue(queue) => self.replace_queue(queue),
        }
    }

    /// Apply every input currently waiting on the input channel
    ///
    /// Returns the number of inputs handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(input) = self.inputs.try_recv() {
            self.handle(input);
            handled += 1;
        }
        handled
    }

    /// Sender feeding this player's input channel
    pub fn input_sender(&self) -> Sender<PlayerInput> {
        self.input_tx.clone()
    }

    pub(crate) fn input_receiver(&self) -> Receiver<PlayerInput> {
        self.inputs.clone()
    }

    // ===== Playback Control =====

    /// Start or resume the current track
    pub fn play(&mut self) {
        let needs_load = match &self.state {
            PlaybackState::Empty => {
                debug!("Play requested with no current track");
                return;
            }
            PlaybackState::Playing(_) => return,
            PlaybackState::Paused(session) => {
                session.is_ended()
                    || session.load().is_none()
                    || session.load() != self.transport.current_load()
            }
        };

        if needs_load && !self.load_current() {
            return;
        }

        self.transport.play();
        self.set_playing(true);
    }

    /// Pause the current track
    pub fn pause(&mut self) {
        if self.state.is_playing() {
            self.transport.pause();
            self.set_playing(false);
        }
    }

    /// Pause when playing, play otherwise
    pub fn toggle(&mut self) {
        if self.state.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Skip to the next track in the queue
    pub fn next(&mut self) {
        self.step(Direction::Forward);
    }

    /// Go back to the previous track in the queue
    pub fn previous(&mut self) {
        self.step(Direction::Backward);
    }

    /// Make the queued track `track_id` current and play it
    pub fn play_track(&mut self, track_id: &TrackId) {
        let Some(entry) = self.queue.entry(track_id) else {
            warn!(track_id = %track_id, "Requested track is not queued");
            return;
        };

        let is_current = self
            .state
            .current_track()
            .is_some_and(|current| current.id == *track_id);

        if is_current {
            self.play();
        } else {
            let track = entry.origin.clone();
            self.switch_to(track, true);
        }
    }

    /// Replace the queue
    ///
    /// The current track stays current even when the new queue lacks it;
    /// it simply has no neighbors until another track is chosen.
    pub fn replace_queue(&mut self, queue: TrackQueue) {
        self.queue = queue;
        let length = self.queue.len();
        info!(length, "Queue replaced");
        self.pending_events
            .push(PlaybackEvent::QueueChanged { length });
    }

    // ===== Transport Signals =====

    fn handle_signal(&mut self, tagged: TaggedSignal) {
        let TaggedSignal { load, signal } = tagged;

        let current = self.state.session().and_then(Session::load);
        if current != Some(load) {
            debug!(load = %load, ?current, ?signal, "Discarding stale transport signal");
            return;
        }

        match signal {
            Signal::TimeAdvanced(position) => {
                if let Some(session) = self.state.session_mut() {
                    session.set_position(position);
                }
                self.emit_position();
            }
            Signal::DurationKnown(duration) => {
                if let Some(session) = self.state.session_mut() {
                    session.set_duration(duration);
                }
                self.emit_position();
            }
            Signal::Ended => self.on_ended(),
            Signal::Failed(message) => self.on_failed(message),
        }
    }

    fn on_ended(&mut self) {
        let Some(session) = self.state.session() else {
            return;
        };
        if session.is_ended() {
            return;
        }

        let track_id = session.track().id.clone();
        debug!(track_id = %track_id, "Track ended");
        self.pending_events.push(PlaybackEvent::TrackFinished {
            track_id: track_id.clone(),
        });

        // Same rule as a manual Next, but playback always continues
        match self.queue.neighbor_of(&track_id, Direction::Forward) {
            Some(entry) => {
                let track = entry.origin.clone();
                self.switch_to(track, true);
            }
            None => {
                info!(track_id = %track_id, "Reached end of queue");
                if let Some(session) = self.state.session_mut() {
                    session.mark_ended();
                }
                self.emit_position();
                self.set_playing(false);
            }
        }
    }

    fn on_failed(&mut self, message: String) {
        let Some(session) = self.state.session_mut() else {
            return;
        };

        // Next Play must reload rather than resume a broken resource
        session.detach_load();
        let track_id = session.track().id.clone();
        warn!(track_id = %track_id, error = %message, "Transport failed");

        self.pending_events
            .push(PlaybackEvent::TransportFailed { track_id, message });
        self.set_playing(false);
    }

    // ===== Transitions =====

    fn step(&mut self, direction: Direction) {
        let Some(current) = self.state.current_track() else {
            debug!(?direction, "Skip requested with no current track");
            return;
        };

        let Some(entry) = self.queue.neighbor_of(&current.id, direction) else {
            debug!(track_id = %current.id, ?direction, "No neighbor in queue");
            return;
        };

        let track = entry.origin.clone();
        let resume = self.state.is_playing();
        self.switch_to(track, resume);
    }

    /// Start a fresh session on `track`, loading it and playing if `resume`
    fn switch_to(&mut self, track: Track, resume: bool) {
        let previous_track_id = self.state.current_track().map(|t| t.id.clone());
        let track_id = track.id.clone();

        let mut session = Session::new(track);
        let load_result = self.transport.load(&track_id);

        info!(track_id = %track_id, ?previous_track_id, "Track changed");
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track_id.clone(),
            previous_track_id,
        });

        let loaded = match load_result {
            Ok(load) => {
                session.attach_load(load);
                true
            }
            Err(e) => {
                self.pending_events.push(PlaybackEvent::TransportFailed {
                    track_id,
                    message: e.to_string(),
                });
                false
            }
        };

        let playing = resume && loaded;
        if playing {
            self.transport.play();
        }
        self.transition(if playing {
            PlaybackState::Playing(session)
        } else {
            PlaybackState::Paused(session)
        });
        self.emit_position();
    }

    /// Load the current track again; `false` when that failed
    fn load_current(&mut self) -> bool {
        let Some(track_id) = self.state.current_track().map(|t| t.id.clone()) else {
            return false;
        };

        match self.transport.load(&track_id) {
            Ok(load) => {
                if let Some(session) = self.state.session_mut() {
                    session.attach_load(load);
                }
                self.emit_position();
                true
            }
            Err(e) => {
                if let Some(session) = self.state.session_mut() {
                    session.detach_load();
                }
                self.pending_events.push(PlaybackEvent::TransportFailed {
                    track_id,
                    message: e.to_string(),
                });
                false
            }
        }
    }

    fn set_playing(&mut self, playing: bool) {
        let next = match std::mem::take(&mut self.state) {
            PlaybackState::Empty => PlaybackState::Empty,
            PlaybackState::Paused(session) | PlaybackState::Playing(session) => {
                if playing {
                    PlaybackState::Playing(session)
                } else {
                    PlaybackState::Paused(session)
                }
            }
        };
        self.transition(next);
    }

    fn transition(&mut self, next: PlaybackState) {
        let before = self.state.status();
        self.state = next;
        let after = self.state.status();

        if before != after {
            debug!(?before, ?after, "Playback status changed");
            self.emit_state_changed(after);
        }
    }

    // ===== State Queries =====

    /// Current playback state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Current queue
    pub fn queue(&self) -> &TrackQueue {
        &self.queue
    }

    /// Whether Next would change the current track
    pub fn has_next(&self) -> bool {
        self.has_neighbor(Direction::Forward)
    }

    /// Whether Previous would change the current track
    pub fn has_previous(&self) -> bool {
        self.has_neighbor(Direction::Backward)
    }

    fn has_neighbor(&self, direction: Direction) -> bool {
        self.state
            .current_track()
            .is_some_and(|track| self.queue.neighbor_of(&track.id, direction).is_some())
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit_state_changed(&mut self, status: PlaybackStatus) {
        self.pending_events
            .push(PlaybackEvent::StateChanged { status });
    }

    fn emit_position(&mut self) {
        if let Some(session) = self.state.session() {
            let event = PlaybackEvent::position(session.position(), session.duration());
            self.pending_events.push(event);
        }
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("state", &self.state)
            .field("queue_len", &self.queue.len())
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}
