//! Automaton module - explicit expansion and structural analysis

use std::collections::BTreeSet;

pub mod analyzer;
pub mod explicit;
pub mod graph;
pub mod scc;

// Re-export key types
pub use analyzer::{WeaknessReport, WeaknessViolation, check_weakness};
pub use explicit::ExplicitAutomaton;
pub use graph::StateGraph;
pub use scc::{Scc, decompose};

/// Structural analysis results for one automaton
#[derive(Debug)]
pub struct Analysis {
    /// States the analysis ran over (reachable, or all when exhaustive)
    pub scope: BTreeSet<usize>,
    pub sccs: Vec<Scc>,
    pub weakness: WeaknessReport,
}

/// Run the analysis pipeline over an explicit automaton: reachability (unless
/// `all_states`), SCC decomposition, weakness check.
pub fn analyze(aut: &ExplicitAutomaton, all_states: bool) -> (StateGraph, Analysis) {
    let graph = StateGraph::from_automaton(aut);
    let scope = graph.scope(aut, all_states);
    let sccs = decompose(&graph, &scope);
    let weakness = check_weakness(&sccs, &aut.accepting_states);

    (
        graph,
        Analysis {
            scope,
            sccs,
            weakness,
        },
    )
}
