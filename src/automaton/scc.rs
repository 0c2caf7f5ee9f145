//! Strongly connected component decomposition
//!
//! Iterative Tarjan over the analysis scope (normally the reachable set). The
//! DFS is driven by an explicit work-stack of `(node, next-child)` frames so
//! the recursion depth is bounded by a heap allocation, not the call stack.

use crate::automaton::StateGraph;
use std::collections::{BTreeSet, HashMap, HashSet};

/// A strongly connected component: a maximal set of states pairwise reachable
/// from one another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scc {
    states: Vec<usize>,
}

impl Scc {
    /// Create an SCC from its member states (kept sorted for determinism)
    pub fn new(mut states: Vec<usize>) -> Self {
        states.sort_unstable();
        Self { states }
    }

    pub fn states(&self) -> &[usize] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, state: usize) -> bool {
        self.states.binary_search(&state).is_ok()
    }

    /// A trivial SCC is a singleton without a self-loop: it carries no cycle
    /// and is ignored by the weakness analysis.
    pub fn is_trivial(&self, graph: &StateGraph) -> bool {
        self.states.len() == 1 && !graph.has_self_loop(self.states[0])
    }
}

/// Partition `scope` into strongly connected components.
///
/// Edges leaving `scope` are ignored, so the union of the returned components
/// is exactly `scope` and the components are pairwise disjoint.
pub fn decompose(graph: &StateGraph, scope: &BTreeSet<usize>) -> Vec<Scc> {
    // Adjacency restricted to the scope, in deterministic order
    let adjacency: HashMap<usize, Vec<usize>> = scope
        .iter()
        .map(|&s| {
            let mut succ: Vec<usize> = graph
                .successors(s)
                .into_iter()
                .filter(|t| scope.contains(t))
                .collect();
            succ.sort_unstable();
            (s, succ)
        })
        .collect();

    let mut index: HashMap<usize, usize> = HashMap::new();
    let mut lowlink: HashMap<usize, usize> = HashMap::new();
    let mut on_stack: HashSet<usize> = HashSet::new();
    let mut stack: Vec<usize> = Vec::new();
    let mut next_index = 0usize;
    let mut sccs = Vec::new();

    for &root in scope {
        if index.contains_key(&root) {
            continue;
        }

        // (state, position of the next child to visit)
        let mut work: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(&(v, pos)) = work.last() {
            if pos == 0 {
                index.insert(v, next_index);
                lowlink.insert(v, next_index);
                next_index += 1;
                stack.push(v);
                on_stack.insert(v);
            }

            let children = &adjacency[&v];
            if pos < children.len() {
                let w = children[pos];
                work.last_mut().unwrap().1 += 1;

                if !index.contains_key(&w) {
                    work.push((w, 0));
                } else if on_stack.contains(&w) {
                    let low = lowlink[&v].min(index[&w]);
                    lowlink.insert(v, low);
                }
            } else {
                work.pop();
                if let Some(&(parent, _)) = work.last() {
                    let low = lowlink[&parent].min(lowlink[&v]);
                    lowlink.insert(parent, low);
                }

                if lowlink[&v] == index[&v] {
                    let mut component = Vec::new();
                    loop {
                        let w = stack.pop().expect("tarjan stack underflow");
                        on_stack.remove(&w);
                        component.push(w);
                        if w == v {
                            break;
                        }
                    }
                    sccs.push(Scc::new(component));
                }
            }
        }
    }

    sccs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::ExplicitAutomaton;
    use crate::parser::parse_text;
    use crate::parser::text::{DUMP_BEGIN, DUMP_END};

    fn setup(body: &str) -> (ExplicitAutomaton, StateGraph) {
        let sym = parse_text(&format!("{}\n{}\n{}\n", DUMP_BEGIN, body, DUMP_END)).unwrap();
        let aut = ExplicitAutomaton::build(&sym).unwrap();
        let graph = StateGraph::from_automaton(&aut);
        (aut, graph)
    }

    fn assert_valid_partition(sccs: &[Scc], scope: &BTreeSet<usize>) {
        let mut seen = BTreeSet::new();
        for scc in sccs {
            for &s in scc.states() {
                assert!(seen.insert(s), "state {} in two components", s);
            }
        }
        assert_eq!(&seen, scope);
    }

    #[test]
    fn test_single_self_loop() {
        let (aut, graph) = setup("num_state_bits=1\nnum_inputs=1\nnum_outputs=0\ntrans_func_0=");
        let scope = graph.scope(&aut, false);
        let sccs = decompose(&graph, &scope);

        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].states(), &[0]);
        // Self-loop means the singleton is not trivial
        assert!(!sccs[0].is_trivial(&graph));
        assert_valid_partition(&sccs, &scope);
    }

    #[test]
    fn test_two_state_cycle() {
        // 0 -> 1 (bit 0 fires on state 0) and 1 -> 0 (nothing fires on 1)
        let (aut, graph) = setup("num_state_bits=1\nnum_inputs=0\nnum_outputs=0\ntrans_func_0=0,0,0");
        let scope = graph.scope(&aut, false);
        let sccs = decompose(&graph, &scope);

        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].states(), &[0, 1]);
        assert!(!sccs[0].is_trivial(&graph));
    }

    #[test]
    fn test_chain_gives_singletons() {
        // 0 -> 1 -> 3 -> 3: bit patterns chosen so no state revisits a predecessor
        let (aut, graph) = setup(
            "num_state_bits=2\nnum_inputs=0\nnum_outputs=0\n\
             trans_func_0=0,0,0;1,0,0;3,0,0\ntrans_func_1=1,0,0;3,0,0",
        );
        let scope = graph.scope(&aut, false);
        let sccs = decompose(&graph, &scope);

        assert_valid_partition(&sccs, &BTreeSet::from([0, 1, 3]));
        let trivial: Vec<bool> = sccs.iter().map(|s| s.is_trivial(&graph)).collect();
        // 0 and 1 are passed through once; 3 loops on itself
        assert_eq!(trivial.iter().filter(|t| **t).count(), 2);
        assert!(sccs.iter().any(|s| s.states() == [3] && !s.is_trivial(&graph)));
    }

    #[test]
    fn test_scc_members_mutually_reachable() {
        let (aut, graph) = setup(
            "num_state_bits=2\nnum_inputs=1\nnum_outputs=0\n\
             trans_func_0=0,0,0;0,1,0;1,1,0\ntrans_func_1=1,0,0;1,1,0;2,1,0;3,0,0;3,1,0",
        );
        let scope = graph.scope(&aut, true);
        let sccs = decompose(&graph, &scope);
        assert_valid_partition(&sccs, &scope);

        for scc in &sccs {
            for &a in scc.states() {
                for &b in scc.states() {
                    if a == b {
                        continue;
                    }
                    assert!(
                        reaches_within(&graph, scc, a, b),
                        "{} cannot reach {} inside its component",
                        a,
                        b
                    );
                }
            }
        }
    }

    fn reaches_within(graph: &StateGraph, scc: &Scc, from: usize, to: usize) -> bool {
        let mut frontier = vec![from];
        let mut visited = BTreeSet::new();
        while let Some(s) = frontier.pop() {
            for t in graph.successors(s) {
                if t == to {
                    return true;
                }
                if scc.contains(t) && visited.insert(t) {
                    frontier.push(t);
                }
            }
        }
        false
    }

    #[test]
    fn test_scope_restriction() {
        // Full scope has a 0 <-> 1 cycle; restricting scope to {0} must not
        // follow edges through the excluded state.
        let (_, graph) = setup("num_state_bits=1\nnum_inputs=0\nnum_outputs=0\ntrans_func_0=0,0,0");
        let scope = BTreeSet::from([0]);
        let sccs = decompose(&graph, &scope);

        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].states(), &[0]);
        assert!(sccs[0].is_trivial(&graph));
    }
}
