//! yz-core: Game engine and terminal front end for Yahtzee.
//!
//! This crate contains the dice, scoring rules, turn state machine, score
//! table, journal and the command loop. Exposed as a library for
//! integration testing.

pub mod command;
pub mod config;
pub mod dice;
pub mod game;
pub mod journal;
pub mod renderer;
pub mod repl;
pub mod scorecard;
pub mod scoring;
pub mod style;
pub mod table;

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. `RUST_LOG` overrides `default_level`.
/// Calling it twice is harmless; the first subscriber wins.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
