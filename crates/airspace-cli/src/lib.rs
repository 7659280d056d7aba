//! Airspace CLI - headless runner for the airspace simulation core.
//!
//! - config: environment and file based configuration
//! - sim: pre-built UAV scenarios
//! - airspace-sim (bin): drives a simulation at a fixed rate and logs alerts

pub mod config;
pub mod sim;

pub use config::Config;
