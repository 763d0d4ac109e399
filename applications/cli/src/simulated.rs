/// Simulated audio device
///
/// Stands in for a real output backend: a worker thread keeps a clock for
/// the loaded track and reports duration, position and end of media
/// through the track's signal sink.
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use encore_playback::{SignalSink, Transport};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

/// Commands sent to the device thread
#[derive(Debug)]
enum DeviceCommand {
    /// Replace the loaded track
    Load(Url, SignalSink),

    /// Start or resume the clock
    Play,

    /// Stop the clock
    Pause,

    /// Exit the device thread
    Shutdown,
}

/// Transport that plays silence on a timer
pub struct SimulatedTransport {
    command_tx: Sender<DeviceCommand>,
    thread: Option<JoinHandle<()>>,
}

impl SimulatedTransport {
    /// Start the device thread
    ///
    /// Every track lasts `track_length`; positions are reported every `tick`.
    /// Locators whose path contains `unavailable` fail to load.
    pub fn new(tick: Duration, track_length: Duration) -> std::io::Result<Self> {
        let (command_tx, command_rx) = unbounded();

        let thread = thread::Builder::new()
            .name("encore-device".to_string())
            .spawn(move || run_device(&command_rx, tick, track_length))?;

        Ok(Self {
            command_tx,
            thread: Some(thread),
        })
    }

    fn send(&self, command: DeviceCommand) {
        self.command_tx.send(command).ok();
    }
}

impl Transport for SimulatedTransport {
    fn load(&mut self, locator: &Url, sink: SignalSink) {
        self.send(DeviceCommand::Load(locator.clone(), sink));
    }

    fn play(&mut self) {
        self.send(DeviceCommand::Play);
    }

    fn pause(&mut self) {
        self.send(DeviceCommand::Pause);
    }
}

impl Drop for SimulatedTransport {
    fn drop(&mut self) {
        self.send(DeviceCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            thread.join().ok();
        }
    }
}

/// Clock for the currently loaded track
struct Loaded {
    sink: SignalSink,
    position: Duration,
    finished: bool,
}

fn run_device(command_rx: &Receiver<DeviceCommand>, tick: Duration, track_length: Duration) {
    let mut loaded: Option<Loaded> = None;
    let mut playing = false;
    let mut next_tick = Instant::now() + tick;

    loop {
        match command_rx.recv_deadline(next_tick) {
            Ok(DeviceCommand::Load(locator, sink)) => {
                debug!(url = %locator, load = %sink.load(), "Device loading");
                if locator.path().contains("unavailable") {
                    sink.failed(format!("{} could not be opened", locator));
                    loaded = None;
                } else {
                    sink.duration_known(track_length.as_secs_f64());
                    loaded = Some(Loaded {
                        sink,
                        position: Duration::ZERO,
                        finished: false,
                    });
                }
                // A new source starts stopped until asked to play
                playing = false;
            }
            Ok(DeviceCommand::Play) => playing = true,
            Ok(DeviceCommand::Pause) => playing = false,
            Ok(DeviceCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => {
                info!("Device thread exiting");
                break;
            }
            Err(RecvTimeoutError::Timeout) => {
                next_tick += tick;
                if playing {
                    if let Some(track) = loaded.as_mut() {
                        advance(track, tick, track_length);
                    }
                }
            }
        }
    }
}

fn advance(track: &mut Loaded, tick: Duration, track_length: Duration) {
    if track.finished {
        return;
    }

    track.position = (track.position + tick).min(track_length);
    track.sink.time_advanced(track.position.as_secs_f64());

    if track.position >= track_length {
        track.finished = true;
        track.sink.ended();
    }
}
