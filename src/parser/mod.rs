//! Parser module - symbolic dump decoding
//!
//! The solver emits its symbolic automaton either as a sentinel-delimited text
//! block embedded in its diagnostic output, or as a standalone JSON document.
//! Both decode into the same [`SymbolicAutomaton`] intermediate form.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod json;
pub mod text;

pub use json::parse_json;
pub use text::parse_text;

/// The parsed intermediate form of a symbolic dump.
///
/// Transition functions are kept as positive-form characteristic functions: for
/// each next-state bit, the set of `(state, input, output)` assignments for
/// which that bit evaluates to 1. No automaton invariants are validated here;
/// out-of-range indices are caught by the explicit builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolicAutomaton {
    pub num_state_bits: usize,
    pub num_inputs: usize,
    pub num_outputs: usize,

    /// BDD variable indices backing each state bit, informational only
    pub state_var_indices: Vec<usize>,

    pub input_labels: Vec<String>,
    pub output_labels: Vec<String>,

    /// Per-bit minterm triples `(state, input, output)`
    pub trans_funcs: HashMap<usize, Vec<(usize, usize, usize)>>,

    /// Accepting states as LSB-first binary strings
    pub accepting_minterms: Vec<String>,

    /// Initial state as an LSB-first binary string; empty means state 0
    pub initial_minterm: String,
}

/// Supported dump formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    /// Sentinel-delimited `key=value` text block
    Text,
    /// Structured JSON document
    Json,
}

/// Guess the dump format from the document content.
///
/// JSON dumps are standalone objects; text dumps are solver output with the
/// block embedded somewhere in it.
pub fn detect_format(content: &str) -> DumpFormat {
    if content.trim_start().starts_with('{') {
        DumpFormat::Json
    } else {
        DumpFormat::Text
    }
}

/// Parse a dump document in the given format
pub fn parse(content: &str, format: DumpFormat) -> Result<SymbolicAutomaton> {
    match format {
        DumpFormat::Text => parse_text(content),
        DumpFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format("  {\"num_state_bits\": 1}"), DumpFormat::Json);
        assert_eq!(detect_format("===PYDFA_BEGIN===\n"), DumpFormat::Text);
        assert_eq!(detect_format(""), DumpFormat::Text);
    }
}
