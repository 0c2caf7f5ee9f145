//! Graph view of the explicit automaton
//!
//! Wraps the edge-grouped view in a petgraph digraph for traversal. The
//! `(input, output)` assignments stay on the [`ExplicitAutomaton`]; nodes carry
//! the state index and edges carry nothing.

use crate::automaton::ExplicitAutomaton;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};

/// A directed graph over the automaton's states.
///
/// One node per declared state and one edge per `(state, next_state)` pair in
/// the edge-grouped view, so traversals walk the grouped relation rather than
/// the denser raw transition function.
pub struct StateGraph {
    /// The underlying graph structure; node weights are state indices
    pub graph: DiGraph<usize, ()>,

    /// Lookup table mapping state indices to their internal graph indices
    pub node_index: HashMap<usize, NodeIndex>,
}

impl StateGraph {
    /// Build the graph view for every declared state
    pub fn from_automaton(aut: &ExplicitAutomaton) -> Self {
        let mut graph = DiGraph::with_capacity(aut.num_states, aut.edges.len());
        let mut node_index = HashMap::with_capacity(aut.num_states);

        for state in 0..aut.num_states {
            node_index.insert(state, graph.add_node(state));
        }
        for &(from, to) in aut.edges.keys() {
            graph.add_edge(node_index[&from], node_index[&to], ());
        }

        Self { graph, node_index }
    }

    /// States reachable from `initial` via any edge, including `initial` itself
    pub fn reachable(&self, initial: usize) -> BTreeSet<usize> {
        let mut reachable = BTreeSet::new();
        let Some(&start) = self.node_index.get(&initial) else {
            return reachable;
        };

        let mut bfs = Bfs::new(&self.graph, start);
        while let Some(nx) = bfs.next(&self.graph) {
            reachable.insert(self.graph[nx]);
        }
        reachable
    }

    /// The state set analysis runs over: reachable states, or every declared
    /// state when exhaustive visualization was requested
    pub fn scope(&self, aut: &ExplicitAutomaton, all_states: bool) -> BTreeSet<usize> {
        if all_states {
            (0..aut.num_states).collect()
        } else {
            self.reachable(aut.initial_state)
        }
    }

    /// Successor states of `state`, in graph insertion order
    pub fn successors(&self, state: usize) -> Vec<usize> {
        let Some(&idx) = self.node_index.get(&state) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|nx| self.graph[nx])
            .collect()
    }

    pub fn has_self_loop(&self, state: usize) -> bool {
        self.node_index
            .get(&state)
            .is_some_and(|&idx| self.graph.find_edge(idx, idx).is_some())
    }
}
