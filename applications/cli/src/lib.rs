//! Encore CLI
//!
//! Terminal host for the Encore playback controller: configuration,
//! queue loading, a simulated output device and a line-oriented console.

pub mod config;
pub mod console;
pub mod error;
pub mod queue;
pub mod simulated;

pub use config::CliConfig;
pub use error::{CliError, Result};
pub use simulated::SimulatedTransport;
