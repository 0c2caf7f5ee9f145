//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use crate::automaton::{Analysis, ExplicitAutomaton, analyze};
use crate::cli::InputFormat;
use crate::error::Error;
use crate::parser::{self, DumpFormat};
use crate::render::{DotOptions, MinimizeCapability, render_dot};
use crate::{Config, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read the dump document from a file or stdin
fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

/// Resolve the dump format: an explicit CLI choice wins, then a non-auto
/// config default, then the file extension, then a content sniff.
fn resolve_format(
    arg: InputFormat,
    config: &Config,
    input: Option<&Path>,
    content: &str,
) -> DumpFormat {
    match arg {
        InputFormat::Text => return DumpFormat::Text,
        InputFormat::Json => return DumpFormat::Json,
        InputFormat::Auto => {}
    }

    match config.default.format.as_str() {
        "text" => return DumpFormat::Text,
        "json" => return DumpFormat::Json,
        _ => {}
    }

    if let Some(path) = input
        && path.extension().is_some_and(|ext| ext == "json")
    {
        return DumpFormat::Json;
    }

    parser::detect_format(content)
}

/// Parse, expand and analyze one dump document
fn run_pipeline(
    content: &str,
    format: DumpFormat,
    all_states: bool,
) -> Result<(ExplicitAutomaton, Analysis)> {
    let sym = parser::parse(content, format)?;
    tracing::debug!(
        "Parsed symbolic automaton: {} state bits, {} inputs, {} outputs",
        sym.num_state_bits,
        sym.num_inputs,
        sym.num_outputs
    );
    if !sym.state_var_indices.is_empty() {
        tracing::debug!("State variable indices: {:?}", sym.state_var_indices);
    }

    let aut = ExplicitAutomaton::build(&sym)?;
    let (_, analysis) = analyze(&aut, all_states);
    Ok((aut, analysis))
}

/// Render command implementation
pub mod render {
    use super::*;
    use crate::cli::{Cli, Commands, output};
    use std::process::{Command, Stdio};

    /// Execute the render command
    pub fn execute(args: Cli, config: Config) -> Result<()> {
        let (input, format, output_path, dot_only, all_states, raw_labels, dot_binary) =
            match args.command {
                Commands::Render {
                    input,
                    format,
                    output,
                    dot_only,
                    all_states,
                    raw_labels,
                    dot_binary,
                } => (
                    input,
                    format,
                    output,
                    dot_only,
                    all_states || config.render.all_states,
                    raw_labels || config.render.raw_labels,
                    dot_binary.unwrap_or_else(|| config.render.dot_binary.clone()),
                ),
                _ => unreachable!("render::execute called with wrong command"),
            };

        let content = read_input(input.as_deref())?;
        let dump_format = resolve_format(format, &config, input.as_deref(), &content);
        tracing::debug!("Using dump format: {:?}", dump_format);

        let (aut, analysis) = run_pipeline(&content, dump_format, all_states)?;

        // Capability is chosen once here and threaded through rendering
        let capability = if raw_labels {
            MinimizeCapability::Approximate
        } else {
            MinimizeCapability::Exact
        };

        let mut stderr = std::io::stderr();
        output::write_summary(&mut stderr, &aut, &analysis)?;
        output::write_weakness_report(&mut stderr, &analysis.weakness)?;

        let options = DotOptions {
            rankdir: config.render.rankdir.clone(),
        };
        let dot = render_dot(&aut, &analysis, capability, &options);

        if dot_only {
            println!("{}", dot);
            return Ok(());
        }

        let output_path = output_path.unwrap_or_else(|| PathBuf::from("dfa.png"));
        match run_layout_tool(&dot, &dot_binary, &output_path) {
            Ok(()) => {
                tracing::info!("Generated {:?}", output_path);
                Ok(())
            }
            Err(Error::RenderBackend(msg)) => {
                // Recoverable: emit the document itself, never drop it silently
                tracing::warn!("{}; falling back to DOT output", msg);
                println!("{}", dot);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Pipe the DOT document through the external layout binary
    fn run_layout_tool(dot: &str, binary: &str, output: &Path) -> Result<()> {
        use std::io::Write;

        let mut child = match Command::new(binary)
            .arg("-Tpng")
            .arg("-o")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::render_backend(format!(
                    "{:?} not found, install graphviz",
                    binary
                )));
            }
            Err(e) => return Err(e.into()),
        };

        child
            .stdin
            .take()
            .expect("child stdin was piped")
            .write_all(dot.as_bytes())?;

        let result = child.wait_with_output()?;
        if !result.status.success() {
            crate::bail!(
                "layout tool {:?} failed: {}",
                binary,
                String::from_utf8_lossy(&result.stderr).trim()
            );
        }
        Ok(())
    }
}

/// Check command implementation
pub mod check {
    use super::*;
    use crate::cli::{Cli, Commands, output};

    /// Execute the check command
    pub fn execute(args: Cli, config: Config) -> Result<()> {
        let (input, format, all_states) = match args.command {
            Commands::Check {
                input,
                format,
                all_states,
            } => (input, format, all_states || config.render.all_states),
            _ => unreachable!("check::execute called with wrong command"),
        };

        let content = read_input(input.as_deref())?;
        let dump_format = resolve_format(format, &config, input.as_deref(), &content);

        let (aut, analysis) = run_pipeline(&content, dump_format, all_states)?;

        let mut stderr = std::io::stderr();
        output::write_summary(&mut stderr, &aut, &analysis)?;
        output::write_weakness_report(&mut stderr, &analysis.weakness)?;

        if analysis.weakness.is_weak() {
            tracing::info!("Automaton is weak");
            Ok(())
        } else {
            crate::bail!(
                "automaton is not weak: {} mixed component(s)",
                analysis.weakness.violations.len()
            );
        }
    }
}
