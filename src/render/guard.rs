//! Edge guard minimization
//!
//! Every explicit edge carries the set of `(input, output)` assignments that
//! take it. For display, that set is compressed into a Boolean guard over the
//! named input/output variables: a minimized sum-of-products cover of exactly
//! the given vectors. No don't-cares exist here - every other vector belongs
//! to a different edge and must not be covered.
//!
//! Vectors place inputs at bit positions `0..num_inputs` and outputs above
//! them, matching the variable order `input_labels ++ output_labels`.

use std::collections::BTreeSet;

/// How guards are produced.
///
/// Selected once at startup and threaded through calls; `Approximate` prints a
/// representative term per edge and marks the label as non-canonical with a
/// trailing ellipsis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinimizeCapability {
    Exact,
    Approximate,
}

/// Variable naming context for one automaton
#[derive(Debug, Clone, Copy)]
pub struct GuardVars<'a> {
    pub num_inputs: usize,
    pub num_outputs: usize,
    pub input_labels: &'a [String],
    pub output_labels: &'a [String],
}

impl GuardVars<'_> {
    fn num_vars(&self) -> usize {
        self.num_inputs + self.num_outputs
    }

    fn name(&self, var: usize) -> String {
        if var < self.num_inputs {
            self.input_labels
                .get(var)
                .cloned()
                .unwrap_or_else(|| format!("i{}", var))
        } else {
            let out = var - self.num_inputs;
            self.output_labels
                .get(out)
                .cloned()
                .unwrap_or_else(|| format!("o{}", out))
        }
    }
}

/// Produce the guard string for one edge's `(input, output)` pairs
pub fn guard_label(
    pairs: &[(usize, usize)],
    vars: GuardVars<'_>,
    capability: MinimizeCapability,
) -> String {
    let num_vars = vars.num_vars();
    let all_combos = 1usize << num_vars;

    // Every assignment takes this edge
    if pairs.len() == all_combos {
        return "true".to_string();
    }
    if pairs.is_empty() {
        return "false".to_string();
    }

    match capability {
        MinimizeCapability::Exact => minimize(pairs, vars),
        MinimizeCapability::Approximate => representative(pairs, vars),
    }
}

fn vector(pair: (usize, usize), vars: GuardVars<'_>) -> usize {
    pair.0 | (pair.1 << vars.num_inputs)
}

/// A product term: `value` on the unmasked bits, `mask` bits are don't-care
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Implicant {
    value: usize,
    mask: usize,
}

impl Implicant {
    fn from_minterm(m: usize) -> Self {
        Self { value: m, mask: 0 }
    }

    fn covers(&self, m: usize) -> bool {
        (m & !self.mask) == self.value
    }

    /// Merge two implicants differing in exactly one tested bit
    fn combine(&self, other: &Self) -> Option<Self> {
        if self.mask != other.mask {
            return None;
        }
        let diff = self.value ^ other.value;
        if diff.count_ones() != 1 {
            return None;
        }
        Some(Self {
            value: self.value & !diff,
            mask: self.mask | diff,
        })
    }
}

/// Exact Quine-McCluskey minimization of the given vector set
fn minimize(pairs: &[(usize, usize)], vars: GuardVars<'_>) -> String {
    let minterms: BTreeSet<usize> = pairs.iter().map(|&p| vector(p, vars)).collect();

    // Prime implicant generation: repeatedly merge implicants differing in
    // one bit; anything never merged is prime.
    let mut current: BTreeSet<Implicant> =
        minterms.iter().map(|&m| Implicant::from_minterm(m)).collect();
    let mut primes: BTreeSet<Implicant> = BTreeSet::new();

    while !current.is_empty() {
        let level: Vec<Implicant> = current.iter().copied().collect();
        let mut merged: BTreeSet<Implicant> = BTreeSet::new();
        let mut next: BTreeSet<Implicant> = BTreeSet::new();

        for (i, a) in level.iter().enumerate() {
            for b in &level[i + 1..] {
                if let Some(c) = a.combine(b) {
                    next.insert(c);
                    merged.insert(*a);
                    merged.insert(*b);
                }
            }
        }

        primes.extend(level.iter().filter(|imp| !merged.contains(*imp)));
        current = next;
    }

    // Cover selection: essential primes first, then greedy by coverage
    let primes: Vec<Implicant> = primes.into_iter().collect();
    let mut uncovered: BTreeSet<usize> = minterms.clone();
    let mut selected: Vec<Implicant> = Vec::new();

    for &m in &minterms {
        let covering: Vec<&Implicant> = primes.iter().filter(|p| p.covers(m)).collect();
        if covering.len() == 1 && !selected.contains(covering[0]) {
            selected.push(*covering[0]);
        }
    }
    for p in &selected {
        uncovered.retain(|&m| !p.covers(m));
    }

    while !uncovered.is_empty() {
        let best = primes
            .iter()
            .filter(|p| !selected.contains(*p))
            .max_by_key(|p| {
                (
                    uncovered.iter().filter(|&&m| p.covers(m)).count(),
                    std::cmp::Reverse(**p),
                )
            })
            .copied()
            .expect("prime implicants must cover all minterms");
        selected.push(best);
        uncovered.retain(|&m| !best.covers(m));
    }

    let mut terms: Vec<String> = selected
        .iter()
        .map(|imp| render_term(imp, vars, selected.len() > 1))
        .collect();
    terms.sort();
    terms.join(" ∨ ")
}

fn render_term(imp: &Implicant, vars: GuardVars<'_>, parenthesize: bool) -> String {
    let literals: Vec<String> = (0..vars.num_vars())
        .filter(|var| imp.mask & (1 << var) == 0)
        .map(|var| {
            if imp.value & (1 << var) != 0 {
                vars.name(var)
            } else {
                format!("!{}", vars.name(var))
            }
        })
        .collect();

    if literals.is_empty() {
        return "true".to_string();
    }
    if parenthesize && literals.len() > 1 {
        format!("({})", literals.join(" ∧ "))
    } else {
        literals.join(" ∧ ")
    }
}

/// Non-canonical fallback: one conjunctive term for the first vector, with a
/// trailing ellipsis when the edge carries more
fn representative(pairs: &[(usize, usize)], vars: GuardVars<'_>) -> String {
    let imp = Implicant::from_minterm(vector(pairs[0], vars));
    let term = render_term(&imp, vars, false);

    if pairs.len() > 1 {
        format!("({}) ∨ ...", term)
    } else {
        term
    }
}
