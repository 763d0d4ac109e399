/// Encore - terminal playback controller
use anyhow::Context;
use clap::Parser;
use crossbeam_channel::{select, unbounded, Receiver};
use encore_cli::{
    config::CliConfig,
    console::{self, ConsoleCommand},
    queue, SimulatedTransport,
};
use encore_playback::{Player, PlayerService, StreamEndpoint, TrackQueue};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::thread;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Play a queue of streaming tracks from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./encore.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file holding an array of tracks to queue
    #[arg(short, long)]
    queue: Option<PathBuf>,

    /// Start the first track immediately
    #[arg(long)]
    autoplay: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let tracks = match &cli.queue {
        Some(path) => queue::load_queue(path)
            .with_context(|| format!("Failed to load queue from {}", path.display()))?,
        None => queue::demo_queue(),
    };
    tracing::info!("Queued {} tracks", tracks.len());

    let endpoint = StreamEndpoint::new(&config.stream.base_url, config.stream.client_id.clone())
        .context("Invalid stream base URL")?;
    let device = SimulatedTransport::new(config.simulation.tick(), config.simulation.track_length())
        .context("Failed to start simulated device")?;

    let player = Player::new(device, endpoint).with_queue(tracks.clone());
    let service = PlayerService::spawn(player).context("Failed to start player")?;

    if cli.autoplay || config.playback.autoplay {
        if let Some(first) = tracks.get(0) {
            service.handle().play_track(first.id().clone())?;
        }
    }

    println!("{}", console::HELP);
    run_console(&service, &tracks, spawn_stdin_reader())?;

    service.shutdown();
    Ok(())
}

/// Forward stdin lines to a channel; it closes on EOF
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn run_console(
    service: &PlayerService,
    tracks: &TrackQueue,
    lines: Receiver<String>,
) -> anyhow::Result<()> {
    let controls = service.handle();

    loop {
        select! {
            recv(lines) -> line => {
                let Ok(line) = line else { break };
                match console::parse_line(&line) {
                    Some(ConsoleCommand::Player(command)) => controls.send(command)?,
                    Some(ConsoleCommand::Status) => println!("{}", console::render_status(&service.snapshot())),
                    Some(ConsoleCommand::Queue) => print_queue(tracks, service),
                    Some(ConsoleCommand::Help) => println!("{}", console::HELP),
                    Some(ConsoleCommand::Quit) => break,
                    None if line.trim().is_empty() => {}
                    None => println!("unknown command: {} (try `help`)", line.trim()),
                }
            }
            recv(service.events()) -> event => {
                let Ok(event) = event else { break };
                if let Some(text) = console::render_event(&event, &service.snapshot()) {
                    println!("{}", text);
                }
            }
        }
    }

    Ok(())
}

fn print_queue(tracks: &TrackQueue, service: &PlayerService) {
    let snapshot = service.snapshot();
    let current = snapshot.current_track().map(|track| &track.id);

    for entry in tracks {
        let marker = if Some(entry.id()) == current { '>' } else { ' ' };
        println!(
            "{} {:>10}  {}",
            marker,
            entry.id().as_str(),
            encore_playback::truncate_title(&entry.origin.title)
        );
    }
}
