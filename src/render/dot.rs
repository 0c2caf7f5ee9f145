//! Graphviz DOT rendering
//!
//! Produces the graph description document handed to the external layout
//! tool. Accepting states get a doublecircle with a green outline, fills group
//! states by SCC membership, and an unlabeled pseudo-node points at the
//! initial state. Weakness findings are deliberately NOT embedded here; they
//! belong on the diagnostic stream.

use crate::automaton::{Analysis, ExplicitAutomaton};
use crate::render::guard::{GuardVars, MinimizeCapability, guard_label};
use std::collections::HashMap;

/// Fixed fill palette for SCC grouping, cycled when components outnumber it
pub const SCC_PALETTE: [&str; 10] = [
    "#FFB3BA", "#BAFFC9", "#BAE1FF", "#FFFFBA", "#FFDFBA", "#E0BBE4", "#957DAD", "#D4A5A5",
    "#A8E6CF", "#DCEDC1",
];

/// Rendering options resolved from config and CLI
#[derive(Debug, Clone)]
pub struct DotOptions {
    pub rankdir: String,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            rankdir: "LR".to_string(),
        }
    }
}

/// Render the automaton and its analysis as a DOT digraph
pub fn render_dot(
    aut: &ExplicitAutomaton,
    analysis: &Analysis,
    capability: MinimizeCapability,
    options: &DotOptions,
) -> String {
    let vars = GuardVars {
        num_inputs: aut.num_inputs,
        num_outputs: aut.num_outputs,
        input_labels: &aut.input_labels,
        output_labels: &aut.output_labels,
    };

    let mut fill_by_state: HashMap<usize, &str> = HashMap::new();
    for (i, scc) in analysis.sccs.iter().enumerate() {
        let color = SCC_PALETTE[i % SCC_PALETTE.len()];
        for &s in scc.states() {
            fill_by_state.insert(s, color);
        }
    }

    let mut lines = Vec::new();
    lines.push("digraph DFA {".to_string());
    lines.push(format!("    rankdir={};", options.rankdir));
    lines.push("    node [shape=circle, fontname=\"monospace\"];".to_string());
    lines.push("    edge [fontname=\"monospace\", fontsize=10];".to_string());
    lines.push(String::new());

    // Initial state marker
    lines.push("    __start [shape=none, label=\"\"];".to_string());
    lines.push(format!("    __start -> {};", aut.initial_state));
    lines.push(String::new());

    // Node definitions
    for &s in &analysis.scope {
        let (shape, border) = if aut.is_accepting(s) {
            ("doublecircle", "green")
        } else {
            ("circle", "black")
        };
        let fill = fill_by_state.get(&s).copied().unwrap_or("white");
        lines.push(format!(
            "    {} [shape={}, color={}, style=filled, fillcolor=\"{}\", label=\"{}\"];",
            s, shape, border, fill, s
        ));
    }

    lines.push(String::new());

    // Transitions with minimized guards
    for (&(src, dst), io_pairs) in &aut.edges {
        if !analysis.scope.contains(&src) {
            continue;
        }

        let label = guard_label(io_pairs, vars, capability).replace('"', "\\\"");
        lines.push(format!("    {} -> {} [label=\"{}\"];", src, dst, label));
    }

    lines.push("}".to_string());

    lines.join("\n")
}
