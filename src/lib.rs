//! Symbolic DFA Visualizer
//!
//! A tool for reconstructing explicit automata from the symbolic dumps emitted
//! by the synthesis solver.
//!
//! This library provides functionality for:
//! - Parsing solver dumps (sentinel-delimited text or JSON)
//! - Expanding the per-bit symbolic encoding into an explicit transition table
//! - Reachability and strongly-connected-component analysis
//! - Checking the weak-automaton property
//! - Rendering the automaton as a Graphviz DOT document with minimized edge guards

pub mod automaton;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod render;

pub use config::Config;
pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with the given log level
///
/// The fmt layer writes to stderr so stdout stays reserved for the graph
/// document.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
