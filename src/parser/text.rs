//! Text dump parsing
//!
//! The solver brackets its dump with fixed sentinel lines so it can be fished
//! out of arbitrary diagnostic output:
//!
//! ```text
//! ===PYDFA_BEGIN===
//! num_state_bits=2
//! num_inputs=1
//! num_outputs=1
//! trans_func_0=0,0,0;1,1,0
//! trans_func_1=
//! accepting_minterms=01;11
//! initial_minterm=00
//! ===PYDFA_END===
//! ```
//!
//! Field order inside the block is irrelevant. Lines outside the block, blank
//! lines and lines without `=` are ignored, as are unknown keys.

use crate::error::Error;
use crate::parser::SymbolicAutomaton;
use crate::Result;

/// Begin sentinel emitted by the solver
pub const DUMP_BEGIN: &str = "===PYDFA_BEGIN===";
/// End sentinel emitted by the solver
pub const DUMP_END: &str = "===PYDFA_END===";

/// Parse a sentinel-delimited text dump into a [`SymbolicAutomaton`].
///
/// Returns [`Error::EmptyDump`] when no dump block (or no mandatory field) is
/// present at all, and [`Error::MalformedDump`] when the block is present but
/// structurally broken.
pub fn parse_text(content: &str) -> Result<SymbolicAutomaton> {
    let mut dfa = SymbolicAutomaton::default();

    let mut num_state_bits = None;
    let mut num_inputs = None;
    let mut num_outputs = None;

    let mut in_dump = false;

    for line in content.lines() {
        let line = line.trim();

        if line == DUMP_BEGIN {
            in_dump = true;
            continue;
        } else if line == DUMP_END {
            in_dump = false;
            continue;
        }

        if !in_dump {
            continue;
        }

        let Some((key, val)) = line.split_once('=') else {
            continue;
        };

        match key {
            "num_state_bits" => num_state_bits = Some(parse_int(key, val)?),
            "num_inputs" => num_inputs = Some(parse_int(key, val)?),
            "num_outputs" => num_outputs = Some(parse_int(key, val)?),
            "state_var_indices" => {
                dfa.state_var_indices = parse_int_list(key, val)?;
            }
            "input_labels" => {
                dfa.input_labels = parse_label_list(val);
            }
            "output_labels" => {
                dfa.output_labels = parse_label_list(val);
            }
            "accepting_minterms" => {
                dfa.accepting_minterms = val
                    .split(';')
                    .filter(|m| !m.is_empty())
                    .map(String::from)
                    .collect();
            }
            "initial_minterm" => {
                dfa.initial_minterm = val.to_string();
            }
            _ => {
                if let Some(bit_str) = key.strip_prefix("trans_func_") {
                    let bit = bit_str.parse::<usize>().map_err(|_| {
                        Error::malformed(key, format!("invalid bit index {:?}", bit_str))
                    })?;
                    dfa.trans_funcs.insert(bit, parse_triples(key, val)?);
                }
                // Unknown keys are solver noise, skip them
            }
        }
    }

    // No mandatory field at all means the block was absent, not corrupt
    if num_state_bits.is_none() && num_inputs.is_none() && num_outputs.is_none() {
        return Err(Error::EmptyDump);
    }

    dfa.num_state_bits = require(num_state_bits, "num_state_bits")?;
    dfa.num_inputs = require(num_inputs, "num_inputs")?;
    dfa.num_outputs = require(num_outputs, "num_outputs")?;

    if dfa.num_state_bits == 0 {
        return Err(Error::EmptyDump);
    }

    Ok(dfa)
}

fn require(field: Option<usize>, name: &str) -> Result<usize> {
    field.ok_or_else(|| Error::malformed(name, "mandatory field missing"))
}

fn parse_int(field: &str, val: &str) -> Result<usize> {
    val.trim()
        .parse::<usize>()
        .map_err(|_| Error::malformed(field, format!("expected non-negative integer, got {:?}", val)))
}

fn parse_int_list(field: &str, val: &str) -> Result<Vec<usize>> {
    if val.is_empty() {
        return Ok(Vec::new());
    }
    val.split(',').map(|v| parse_int(field, v)).collect()
}

fn parse_label_list(val: &str) -> Vec<String> {
    if val.is_empty() {
        Vec::new()
    } else {
        val.split(',').map(String::from).collect()
    }
}

/// Parse a `;`-separated list of `state,input,output` triples.
///
/// An empty value means the bit's characteristic function is empty. Trailing
/// separators are tolerated; anything else that is not a well-formed triple is
/// a malformed dump.
fn parse_triples(field: &str, val: &str) -> Result<Vec<(usize, usize, usize)>> {
    let mut triples = Vec::new();
    for entry in val.split(';') {
        if entry.is_empty() {
            continue;
        }
        let parts: Vec<&str> = entry.split(',').collect();
        if parts.len() != 3 {
            return Err(Error::malformed(
                field,
                format!("expected state,input,output triple, got {:?}", entry),
            ));
        }
        triples.push((
            parse_int(field, parts[0])?,
            parse_int(field, parts[1])?,
            parse_int(field, parts[2])?,
        ));
    }
    Ok(triples)
}
