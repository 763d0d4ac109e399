/// CLI error types
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Config file not found: {}", .0.display())]
    MissingConfig(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid queue file: {0}")]
    QueueFormat(#[from] serde_json::Error),

    #[error("Playback error: {0}")]
    Playback(#[from] encore_playback::PlaybackError),
}
