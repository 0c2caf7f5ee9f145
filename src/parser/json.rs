//! Structured dump parsing
//!
//! The solver can also write its dump as a standalone JSON document with the
//! same field set as the text block, `trans_funcs` being an object keyed by bit
//! index:
//!
//! ```json
//! {
//!   "num_state_bits": 2,
//!   "num_inputs": 1,
//!   "num_outputs": 1,
//!   "trans_funcs": { "0": [[0, 0, 0], [1, 1, 0]], "1": [] },
//!   "accepting_minterms": ["01"],
//!   "initial_minterm": "00"
//! }
//! ```

use crate::error::Error;
use crate::parser::SymbolicAutomaton;
use crate::Result;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Raw document shape; mandatory fields stay optional here so their absence
/// can be reported field-by-field instead of as a generic serde error.
#[derive(Debug, Deserialize)]
struct RawDump {
    num_state_bits: Option<usize>,
    num_inputs: Option<usize>,
    num_outputs: Option<usize>,

    #[serde(default)]
    state_var_indices: Vec<usize>,

    #[serde(default)]
    input_labels: Vec<String>,

    #[serde(default)]
    output_labels: Vec<String>,

    #[serde(default)]
    trans_funcs: BTreeMap<String, Vec<Vec<usize>>>,

    #[serde(default)]
    accepting_minterms: Vec<String>,

    #[serde(default)]
    initial_minterm: String,
}

/// Parse a JSON dump document into a [`SymbolicAutomaton`]
pub fn parse_json(content: &str) -> Result<SymbolicAutomaton> {
    let raw: RawDump = serde_json::from_str(content)?;

    if raw.num_state_bits.is_none() && raw.num_inputs.is_none() && raw.num_outputs.is_none() {
        return Err(Error::EmptyDump);
    }

    let num_state_bits = require(raw.num_state_bits, "num_state_bits")?;
    let num_inputs = require(raw.num_inputs, "num_inputs")?;
    let num_outputs = require(raw.num_outputs, "num_outputs")?;

    if num_state_bits == 0 {
        return Err(Error::EmptyDump);
    }

    let mut dfa = SymbolicAutomaton {
        num_state_bits,
        num_inputs,
        num_outputs,
        state_var_indices: raw.state_var_indices,
        input_labels: raw.input_labels,
        output_labels: raw.output_labels,
        accepting_minterms: raw.accepting_minterms,
        initial_minterm: raw.initial_minterm,
        ..Default::default()
    };

    for (bit_str, minterms) in raw.trans_funcs {
        let field = format!("trans_funcs[{}]", bit_str);
        let bit = bit_str
            .parse::<usize>()
            .map_err(|_| Error::malformed(&field, format!("invalid bit index {:?}", bit_str)))?;

        let mut triples = Vec::with_capacity(minterms.len());
        for m in minterms {
            let &[state, input, output] = m.as_slice() else {
                return Err(Error::malformed(
                    &field,
                    format!("expected [state, input, output] triple, got {:?}", m),
                ));
            };
            triples.push((state, input, output));
        }
        dfa.trans_funcs.insert(bit, triples);
    }

    Ok(dfa)
}

fn require(field: Option<usize>, name: &str) -> Result<usize> {
    field.ok_or_else(|| Error::malformed(name, "mandatory field missing"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_dump() {
        let input = r#"{
            "num_state_bits": 2,
            "num_inputs": 1,
            "num_outputs": 1,
            "input_labels": ["req"],
            "output_labels": ["grant"],
            "trans_funcs": { "0": [[0, 0, 0], [1, 1, 0]], "1": [] },
            "accepting_minterms": ["01", "11"],
            "initial_minterm": "00"
        }"#;

        let dfa = parse_json(input).unwrap();
        assert_eq!(dfa.num_state_bits, 2);
        assert_eq!(dfa.num_inputs, 1);
        assert_eq!(dfa.num_outputs, 1);
        assert_eq!(dfa.trans_funcs[&0], vec![(0, 0, 0), (1, 1, 0)]);
        assert_eq!(dfa.trans_funcs[&1], vec![]);
        assert_eq!(dfa.accepting_minterms, vec!["01", "11"]);
        assert_eq!(dfa.initial_minterm, "00");
    }

    #[test]
    fn test_optional_fields_default() {
        let input = r#"{ "num_state_bits": 1, "num_inputs": 0, "num_outputs": 0 }"#;
        let dfa = parse_json(input).unwrap();
        assert!(dfa.trans_funcs.is_empty());
        assert!(dfa.input_labels.is_empty());
        assert!(dfa.initial_minterm.is_empty());
    }

    #[test]
    fn test_missing_mandatory_field() {
        let input = r#"{ "num_state_bits": 1, "num_inputs": 0 }"#;
        let err = parse_json(input).unwrap_err();
        match err {
            Error::MalformedDump { field, .. } => assert_eq!(field, "num_outputs"),
            other => panic!("expected MalformedDump, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_object_is_empty_dump() {
        let err = parse_json("{}").unwrap_err();
        assert!(err.is_empty_dump());
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::MalformedDump { .. }));
    }

    #[test]
    fn test_bad_triple_arity() {
        let input = r#"{
            "num_state_bits": 1,
            "num_inputs": 0,
            "num_outputs": 0,
            "trans_funcs": { "0": [[0, 0]] }
        }"#;
        let err = parse_json(input).unwrap_err();
        match err {
            Error::MalformedDump { field, .. } => assert_eq!(field, "trans_funcs[0]"),
            other => panic!("expected MalformedDump, got {:?}", other),
        }
    }

    #[test]
    fn test_text_and_json_agree() {
        let text = format!(
            "{}\nnum_state_bits=1\nnum_inputs=1\nnum_outputs=0\ntrans_func_0=1,0,0\n{}\n",
            crate::parser::text::DUMP_BEGIN,
            crate::parser::text::DUMP_END
        );
        let json = r#"{
            "num_state_bits": 1,
            "num_inputs": 1,
            "num_outputs": 0,
            "trans_funcs": { "0": [[1, 0, 0]] }
        }"#;

        assert_eq!(
            crate::parser::parse_text(&text).unwrap(),
            parse_json(json).unwrap()
        );
    }
}
