/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "encore.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_stream")]
    pub stream: StreamSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_simulation")]
    pub simulation: SimulationSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StreamSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub client_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Start the first queued track right away
    #[serde(default)]
    pub autoplay: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Interval between position reports
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Length reported for every simulated track
    #[serde(default = "default_track_secs")]
    pub default_track_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_level")]
    pub level: String,
}

impl SimulationSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn track_length(&self) -> Duration {
        Duration::from_secs(self.default_track_secs)
    }
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `encore.toml` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, environment())
    }

    pub(crate) fn load_with(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::MissingConfig(path.to_path_buf()));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (ENCORE_STREAM__CLIENT_ID, ...)
        settings = settings.add_source(env);

        Ok(settings.build()?.try_deserialize()?)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("ENCORE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

// Default values
fn default_stream() -> StreamSettings {
    StreamSettings {
        base_url: default_base_url(),
        client_id: String::new(),
    }
}

fn default_base_url() -> String {
    "https://api.soundcloud.com".to_string()
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings { autoplay: false }
}

fn default_simulation() -> SimulationSettings {
    SimulationSettings {
        tick_ms: default_tick_ms(),
        default_track_secs: default_track_secs(),
    }
}

fn default_tick_ms() -> u64 {
    250
}

fn default_track_secs() -> u64 {
    30
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        level: default_level(),
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            stream: default_stream(),
            playback: default_playback(),
            simulation: default_simulation(),
            logging: default_logging(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let source = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        environment().source(Some(source))
    }

    #[test]
    fn defaults_without_any_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nothing.toml");

        assert!(matches!(
            CliConfig::load_with(Some(&missing), env(&[])),
            Err(CliError::MissingConfig(_))
        ));

        let empty = dir.path().join("empty.toml");
        fs::write(&empty, "").unwrap();
        let config = CliConfig::load_with(Some(&empty), env(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.simulation.tick(), Duration::from_millis(250));
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("encore.toml");
        fs::write(
            &path,
            r#"
[stream]
client_id = "abc123"

[playback]
autoplay = true

[simulation]
default_track_secs = 5
"#,
        )
        .unwrap();

        let config = CliConfig::load_with(Some(&path), env(&[])).unwrap();
        assert_eq!(config.stream.client_id, "abc123");
        assert_eq!(config.stream.base_url, "https://api.soundcloud.com");
        assert!(config.playback.autoplay);
        assert_eq!(config.simulation.track_length(), Duration::from_secs(5));
        assert_eq!(config.simulation.tick_ms, 250);
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("encore.toml");
        fs::write(&path, "[stream]\nclient_id = \"from-file\"\n").unwrap();

        let config = CliConfig::load_with(
            Some(&path),
            env(&[
                ("ENCORE_STREAM__CLIENT_ID", "from-env"),
                ("ENCORE_SIMULATION__TICK_MS", "100"),
            ]),
        )
        .unwrap();

        assert_eq!(config.stream.client_id, "from-env");
        assert_eq!(config.simulation.tick_ms, 100);
    }
}
