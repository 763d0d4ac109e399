//! Threaded player service
//!
//! Runs a [`Player`] on its own thread so every input, from any caller or
//! device callback, is applied by a single owner in arrival order.
//! Callers get a clonable [`PlayerHandle`] to issue commands, an event
//! receiver, and read-only snapshots of the state.

use crossbeam_channel::{bounded, select, unbounded, Receiver, Sender};
use encore_core::TrackId;
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, trace};

use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::player::{Command, Player, PlayerInput};
use crate::queue::TrackQueue;
use crate::types::PlaybackState;

/// Undelivered events beyond which position updates are skipped
const POSITION_BACKLOG: usize = 256;

/// Command surface for a running player
///
/// Every method only enqueues a command; the player re-checks its own
/// state when applying it, so a handle acting on stale information is
/// harmless.
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    tx: Sender<PlayerInput>,
}

impl PlayerHandle {
    /// Start or resume playback
    pub fn play(&self) -> Result<()> {
        self.send(Command::Play)
    }

    /// Pause playback
    pub fn pause(&self) -> Result<()> {
        self.send(Command::Pause)
    }

    /// Pause when playing, play otherwise
    pub fn toggle(&self) -> Result<()> {
        self.send(Command::Toggle)
    }

    /// Skip to the next track
    pub fn next(&self) -> Result<()> {
        self.send(Command::Next)
    }

    /// Go to the previous track
    pub fn previous(&self) -> Result<()> {
        self.send(Command::Previous)
    }

    /// Play a specific queued track
    pub fn play_track(&self, track_id: impl Into<TrackId>) -> Result<()> {
        self.send(Command::PlayTrack(track_id.into()))
    }

    /// Replace the queue
    pub fn replace_queue(&self, queue: TrackQueue) -> Result<()> {
        self.send(Command::ReplaceQueue(queue))
    }

    /// Send an arbitrary command
    pub fn send(&self, command: Command) -> Result<()> {
        self.tx
            .send(PlayerInput::Command(command))
            .map_err(|_| PlaybackError::Disconnected)
    }
}

/// A player running on a dedicated thread
pub struct PlayerService {
    handle: PlayerHandle,
    events: Receiver<PlaybackEvent>,
    snapshot: Arc<RwLock<PlaybackState>>,
    shutdown_tx: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl PlayerService {
    /// Move `player` onto a new thread and start processing inputs
    pub fn spawn(player: Player) -> Result<Self> {
        let handle = PlayerHandle {
            tx: player.input_sender(),
        };
        let (event_tx, events) = unbounded();
        let (shutdown_tx, shutdown_rx) = bounded(1);
        let snapshot = Arc::new(RwLock::new(player.state().clone()));

        let thread_snapshot = snapshot.clone();
        let thread = thread::Builder::new()
            .name("encore-player".to_string())
            .spawn(move || run(player, &event_tx, &shutdown_rx, &thread_snapshot))?;

        info!("Player service started");

        Ok(Self {
            handle,
            events,
            snapshot,
            shutdown_tx,
            thread: Some(thread),
        })
    }

    /// Command surface for this player
    pub fn handle(&self) -> PlayerHandle {
        self.handle.clone()
    }

    /// Receiver for playback events
    ///
    /// Position updates are skipped while the receiver lags behind; every
    /// other event is always delivered. The state snapshot stays accurate
    /// regardless.
    pub fn events(&self) -> &Receiver<PlaybackEvent> {
        &self.events
    }

    /// State as of the last applied input
    pub fn snapshot(&self) -> PlaybackState {
        match self.snapshot.read() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Stop the player thread and wait for it to exit
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.shutdown_tx.send(()).ok();
            if thread.join().is_err() {
                debug!("Player thread panicked during shutdown");
            }
            info!("Player service stopped");
        }
    }
}

impl Drop for PlayerService {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(
    mut player: Player,
    event_tx: &Sender<PlaybackEvent>,
    shutdown_rx: &Receiver<()>,
    snapshot: &RwLock<PlaybackState>,
) {
    let inputs = player.input_receiver();

    loop {
        select! {
            recv(inputs) -> input => match input {
                Ok(input) => {
                    player.handle(input);
                    publish(&mut player, event_tx, snapshot);
                }
                Err(_) => break,
            },
            recv(shutdown_rx) -> _ => break,
        }
    }
}

fn publish(player: &mut Player, event_tx: &Sender<PlaybackEvent>, snapshot: &RwLock<PlaybackState>) {
    match snapshot.write() {
        Ok(mut state) => state.clone_from(player.state()),
        Err(poisoned) => poisoned.into_inner().clone_from(player.state()),
    }

    for event in player.drain_events() {
        if matches!(event, PlaybackEvent::PositionChanged { .. }) && event_tx.len() >= POSITION_BACKLOG {
            trace!(?event, "Subscriber lagging, skipping position update");
            continue;
        }
        // Nobody listening is fine
        event_tx.send(event).ok();
    }
}
