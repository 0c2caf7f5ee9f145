//! Explicit automaton expansion
//!
//! Expands the per-bit symbolic encoding into a fully explicit transition
//! table. The expansion is a cross-product enumeration over every
//! `(state, input, output)` combination; the dumps describe diagnostic-sized
//! automata, so the exponential cost is accepted.

use crate::error::Error;
use crate::parser::SymbolicAutomaton;
use crate::Result;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// A fully expanded automaton.
///
/// Built once from a [`SymbolicAutomaton`], immutable afterwards. The
/// transition function is total: a bit whose minterm set is empty simply never
/// contributes a 1, so every combination resolves to some next state.
#[derive(Debug, Clone)]
pub struct ExplicitAutomaton {
    pub num_state_bits: usize,
    pub num_inputs: usize,
    pub num_outputs: usize,

    /// `1 << num_state_bits`
    pub num_states: usize,

    pub initial_state: usize,
    pub accepting_states: BTreeSet<usize>,

    /// Input variable names, synthesized as `i0,i1,..` where the dump gave none
    pub input_labels: Vec<String>,
    /// Output variable names, synthesized as `o0,o1,..` where the dump gave none
    pub output_labels: Vec<String>,

    /// Flat total transition table indexed by
    /// `(state << (num_inputs + num_outputs)) | (output << num_inputs) | input`
    transition: Vec<usize>,

    /// Edge-grouped view: `(state, next_state)` to the `(input, output)`
    /// assignments taking that edge, in enumeration order
    pub edges: BTreeMap<(usize, usize), Vec<(usize, usize)>>,
}

impl ExplicitAutomaton {
    /// Expand a symbolic automaton into its explicit form.
    ///
    /// This is where the dump's declared bit-widths are enforced: any minterm
    /// index outside its range is a [`Error::MalformedDump`] naming the bit and
    /// the offending datum.
    pub fn build(sym: &SymbolicAutomaton) -> Result<Self> {
        let num_state_bits = sym.num_state_bits;
        let num_inputs = sym.num_inputs;
        let num_outputs = sym.num_outputs;

        let total_width = num_state_bits + num_inputs + num_outputs;
        if total_width >= usize::BITS as usize {
            return Err(Error::malformed(
                "num_state_bits",
                format!(
                    "declared widths ({} bits total) exceed the addressable space",
                    total_width
                ),
            ));
        }

        let num_states = 1usize << num_state_bits;
        let num_input_combos = 1usize << num_inputs;
        let num_output_combos = 1usize << num_outputs;

        // Index the per-bit minterm sets for direct membership tests
        let mut bit_lookup: Vec<HashSet<(usize, usize, usize)>> =
            vec![HashSet::new(); num_state_bits];
        for (&bit, triples) in &sym.trans_funcs {
            let field = format!("trans_func_{}", bit);
            if bit >= num_state_bits {
                return Err(Error::malformed(
                    &field,
                    format!("bit index {} out of range for {} state bits", bit, num_state_bits),
                ));
            }
            for &(state, input, output) in triples {
                if state >= num_states || input >= num_input_combos || output >= num_output_combos {
                    return Err(Error::malformed(
                        &field,
                        format!(
                            "minterm ({},{},{}) out of range for {} state bits, {} inputs, {} outputs",
                            state, input, output, num_state_bits, num_inputs, num_outputs
                        ),
                    ));
                }
                bit_lookup[bit].insert((state, input, output));
            }
        }

        let initial_state = if sym.initial_minterm.is_empty() {
            0
        } else {
            minterm_to_state(&sym.initial_minterm, num_state_bits, "initial_minterm")?
        };

        let mut accepting_states = BTreeSet::new();
        for m in &sym.accepting_minterms {
            if m.is_empty() {
                continue;
            }
            accepting_states.insert(minterm_to_state(m, num_state_bits, "accepting_minterms")?);
        }

        let io_width = num_inputs + num_outputs;
        let mut transition = vec![0usize; num_states << io_width];
        let mut edges: BTreeMap<(usize, usize), Vec<(usize, usize)>> = BTreeMap::new();

        for state in 0..num_states {
            for input in 0..num_input_combos {
                for output in 0..num_output_combos {
                    let mut next_state = 0usize;
                    for (bit, lookup) in bit_lookup.iter().enumerate() {
                        if lookup.contains(&(state, input, output)) {
                            next_state |= 1 << bit;
                        }
                    }

                    transition[(state << io_width) | (output << num_inputs) | input] = next_state;
                    edges
                        .entry((state, next_state))
                        .or_default()
                        .push((input, output));
                }
            }
        }

        Ok(Self {
            num_state_bits,
            num_inputs,
            num_outputs,
            num_states,
            initial_state,
            accepting_states,
            input_labels: synthesize_labels(&sym.input_labels, num_inputs, 'i'),
            output_labels: synthesize_labels(&sym.output_labels, num_outputs, 'o'),
            transition,
            edges,
        })
    }

    /// Look up the successor for a `(state, input, output)` combination
    pub fn transition(&self, state: usize, input: usize, output: usize) -> usize {
        let io_width = self.num_inputs + self.num_outputs;
        self.transition[(state << io_width) | (output << self.num_inputs) | input]
    }

    /// Number of `(input, output)` assignment combinations
    pub fn num_io_combos(&self) -> usize {
        1 << (self.num_inputs + self.num_outputs)
    }

    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepting_states.contains(&state)
    }
}

/// Decode an LSB-first binary minterm string into a state index.
///
/// Character `i` of the string carries bit `i` of the state, so `"01"` decodes
/// to state 2. This mirrors the solver's bit-to-power-of-two mapping and is a
/// fixed wire contract: swapping it would silently renumber states.
pub fn minterm_to_state(minterm: &str, num_bits: usize, field: &str) -> Result<usize> {
    if minterm.len() > num_bits {
        return Err(Error::malformed(
            field,
            format!("minterm {:?} longer than {} state bits", minterm, num_bits),
        ));
    }
    let mut state = 0usize;
    for (i, c) in minterm.chars().enumerate() {
        match c {
            '1' => state |= 1 << i,
            '0' => {}
            _ => {
                return Err(Error::malformed(
                    field,
                    format!("minterm {:?} contains non-binary character {:?}", minterm, c),
                ));
            }
        }
    }
    Ok(state)
}

fn synthesize_labels(given: &[String], count: usize, prefix: char) -> Vec<String> {
    (0..count)
        .map(|i| {
            given
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("{}{}", prefix, i))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_text;
    use crate::parser::text::{DUMP_BEGIN, DUMP_END};

    fn dump(body: &str) -> SymbolicAutomaton {
        parse_text(&format!("{}\n{}\n{}\n", DUMP_BEGIN, body, DUMP_END)).unwrap()
    }

    #[test]
    fn test_minterm_decoding_is_lsb_first() {
        assert_eq!(minterm_to_state("01", 2, "t").unwrap(), 2);
        assert_eq!(minterm_to_state("10", 2, "t").unwrap(), 1);
        assert_eq!(minterm_to_state("11", 2, "t").unwrap(), 3);
        assert_eq!(minterm_to_state("", 2, "t").unwrap(), 0);
    }

    #[test]
    fn test_minterm_rejects_garbage() {
        assert!(minterm_to_state("0x", 2, "t").is_err());
        assert!(minterm_to_state("010", 2, "t").is_err());
    }

    #[test]
    fn test_empty_trans_func_self_loops_on_zero() {
        // One state bit, one input, no outputs, bit function always 0: every
        // combination goes back to state 0.
        let sym = dump(
            "num_state_bits=1\nnum_inputs=1\nnum_outputs=0\n\
             trans_func_0=\ninitial_minterm=0\naccepting_minterms=0",
        );
        let aut = ExplicitAutomaton::build(&sym).unwrap();

        assert_eq!(aut.num_states, 2);
        assert_eq!(aut.initial_state, 0);
        assert!(aut.is_accepting(0));
        assert_eq!(aut.transition(0, 0, 0), 0);
        assert_eq!(aut.transition(0, 1, 0), 0);
        assert_eq!(aut.edges[&(0, 0)], vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_transition_is_total() {
        let sym = dump(
            "num_state_bits=2\nnum_inputs=1\nnum_outputs=1\ntrans_func_0=0,1,0;1,1,1",
        );
        let aut = ExplicitAutomaton::build(&sym).unwrap();

        for state in 0..aut.num_states {
            for input in 0..2 {
                for output in 0..2 {
                    let next = aut.transition(state, input, output);
                    assert!(next < aut.num_states);
                    assert!(aut.edges[&(state, next)].contains(&(input, output)));
                }
            }
        }
    }

    #[test]
    fn test_next_state_assembled_lsb_first() {
        // Both bits fire on (0,0,0): next state must be 0b11 = 3
        let sym = dump(
            "num_state_bits=2\nnum_inputs=0\nnum_outputs=0\n\
             trans_func_0=0,0,0\ntrans_func_1=0,0,0",
        );
        let aut = ExplicitAutomaton::build(&sym).unwrap();
        assert_eq!(aut.transition(0, 0, 0), 3);
    }

    #[test]
    fn test_round_trip_determinism() {
        let body = "num_state_bits=2\nnum_inputs=1\nnum_outputs=1\n\
                    trans_func_0=0,0,0;2,1,1\ntrans_func_1=1,0,1\naccepting_minterms=10";
        let a = ExplicitAutomaton::build(&dump(body)).unwrap();
        let b = ExplicitAutomaton::build(&dump(body)).unwrap();

        assert_eq!(a.transition, b.transition);
        assert_eq!(a.edges, b.edges);
        assert_eq!(a.accepting_states, b.accepting_states);
    }

    #[test]
    fn test_out_of_range_state_in_minterm() {
        // num_state_bits=2 declares states [0,4); state 4 is out of range
        let sym = dump(
            "num_state_bits=2\nnum_inputs=1\nnum_outputs=0\ntrans_func_0=4,0,0",
        );
        let err = ExplicitAutomaton::build(&sym).unwrap_err();
        match err {
            Error::MalformedDump { field, message } => {
                assert_eq!(field, "trans_func_0");
                assert!(message.contains("(4,0,0)"));
            }
            other => panic!("expected MalformedDump, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_bit_index() {
        let sym = dump("num_state_bits=2\nnum_inputs=0\nnum_outputs=0\ntrans_func_5=0,0,0");
        let err = ExplicitAutomaton::build(&sym).unwrap_err();
        match err {
            Error::MalformedDump { field, .. } => assert_eq!(field, "trans_func_5"),
            other => panic!("expected MalformedDump, got {:?}", other),
        }
    }

    #[test]
    fn test_label_synthesis_and_padding() {
        let sym = dump(
            "num_state_bits=1\nnum_inputs=2\nnum_outputs=1\ninput_labels=req",
        );
        let aut = ExplicitAutomaton::build(&sym).unwrap();
        assert_eq!(aut.input_labels, vec!["req", "i1"]);
        assert_eq!(aut.output_labels, vec!["o0"]);
    }
}
