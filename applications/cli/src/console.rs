/// Line-oriented command surface and event rendering
use encore_core::TrackId;
use encore_playback::{
    cover_art_url, format_time, truncate_title, Command, PlaybackEvent, PlaybackState,
    PlaybackStatus,
};

/// One line of user input, parsed
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// Forward to the player
    Player(Command),

    /// Print the current state
    Status,

    /// Print the queue
    Queue,

    /// Print usage
    Help,

    /// Leave the program
    Quit,
}

pub const HELP: &str = "\
commands:
  play [id]     resume, or play the queued track with that id
  pause         pause playback
  toggle        play/pause
  next, n       skip forward
  prev, p       go back
  status, s     show what is playing
  queue, q      list queued tracks
  help          this text
  quit          exit";

/// Parse a console line; `None` for blank or unknown input
pub fn parse_line(line: &str) -> Option<ConsoleCommand> {
    let mut words = line.split_whitespace();
    let verb = words.next()?.to_ascii_lowercase();
    let argument = words.next();

    let command = match (verb.as_str(), argument) {
        ("play", Some(id)) => ConsoleCommand::Player(Command::PlayTrack(TrackId::new(id))),
        ("play", None) => ConsoleCommand::Player(Command::Play),
        ("pause", _) => ConsoleCommand::Player(Command::Pause),
        ("toggle" | "t", _) => ConsoleCommand::Player(Command::Toggle),
        ("next" | "n", _) => ConsoleCommand::Player(Command::Next),
        ("prev" | "previous" | "p", _) => ConsoleCommand::Player(Command::Previous),
        ("status" | "s", _) => ConsoleCommand::Status,
        ("queue" | "q", _) => ConsoleCommand::Queue,
        ("help" | "?", _) => ConsoleCommand::Help,
        ("quit" | "exit", _) => ConsoleCommand::Quit,
        _ => return None,
    };

    Some(command)
}

/// One-line summary of the player state
pub fn render_status(state: &PlaybackState) -> String {
    let Some(track) = state.current_track() else {
        return "[stopped] nothing selected".to_string();
    };

    let marker = match state.status() {
        PlaybackStatus::Playing => "[playing]",
        PlaybackStatus::Paused | PlaybackStatus::Empty => "[paused] ",
    };

    format!(
        "{} {} - {}  {} / {}",
        marker,
        truncate_title(&track.title),
        track.user.username,
        format_time(state.position()),
        format_time(state.duration()),
    )
}

/// Text for an event worth showing, given the state published with it
pub fn render_event(event: &PlaybackEvent, state: &PlaybackState) -> Option<String> {
    match event {
        PlaybackEvent::TrackChanged { track_id, .. } => {
            // The snapshot may already have moved past this change
            let Some(track) = state.current_track().filter(|track| track.id == *track_id) else {
                return Some(format!("now: track {}", track_id));
            };
            let mut line = format!("now: {} - {}", truncate_title(&track.title), track.user.username);
            if let Some(cover) = cover_art_url(track) {
                line.push_str(&format!(" ({})", cover));
            }
            Some(line)
        }
        PlaybackEvent::StateChanged { status } => Some(format!("status: {:?}", status).to_lowercase()),
        PlaybackEvent::TrackFinished { track_id } => Some(format!("finished track {}", track_id)),
        PlaybackEvent::QueueChanged { length } => Some(format!("queue now holds {} tracks", length)),
        PlaybackEvent::TransportFailed { track_id, message } => {
            Some(format!("cannot play track {}: {}", track_id, message))
        }
        PlaybackEvent::PositionChanged { .. } => None,
    }
}
