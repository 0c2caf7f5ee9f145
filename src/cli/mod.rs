//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.

use crate::{Config, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// Symbolic DFA Visualizer CLI
#[derive(Parser, Debug)]
#[command(name = "dfa-viz")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconstruct the automaton from a solver dump and render it
    Render {
        /// Input file (text dump or JSON; stdin when omitted)
        input: Option<PathBuf>,

        /// Input format
        #[arg(short, long, value_enum, default_value = "auto")]
        format: InputFormat,

        /// Output image file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only print the DOT document to stdout, skip the layout tool
        #[arg(long)]
        dot_only: bool,

        /// Show all declared states, not just reachable ones
        #[arg(long)]
        all_states: bool,

        /// Skip guard minimization and print representative labels
        #[arg(long)]
        raw_labels: bool,

        /// Graphviz layout binary (overrides config)
        #[arg(long, env = "DFA_VIZ_DOT")]
        dot_binary: Option<String>,
    },

    /// Check the weak-automaton property; exits non-zero on violations
    Check {
        /// Input file (text dump or JSON; stdin when omitted)
        input: Option<PathBuf>,

        /// Input format
        #[arg(short, long, value_enum, default_value = "auto")]
        format: InputFormat,

        /// Analyze all declared states, not just reachable ones
        #[arg(long)]
        all_states: bool,
    },
}

/// Input format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Detect from file extension and content
    Auto,
    /// Sentinel-delimited text dump
    Text,
    /// Structured JSON document
    Json,
}

/// Execute the CLI command
pub fn execute(args: Cli, config: Config) -> Result<()> {
    match args.command {
        Commands::Render { .. } => commands::render::execute(args, config),
        Commands::Check { .. } => commands::check::execute(args, config),
    }
}
