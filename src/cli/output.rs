//! Output formatting module
//!
//! Formats the parsed-automaton summary and the weakness report for the
//! diagnostic stream. The graph document itself goes to stdout; everything
//! here is written to a caller-supplied writer so the two streams never mix.

use crate::automaton::{Analysis, ExplicitAutomaton, WeaknessReport};
use crate::Result;

/// Fixed marker line harnesses scan the diagnostic stream for
pub const WEAKNESS_MARKER: &str = "WARNING: AUTOMATON IS NOT WEAK";

/// Write the parsed-automaton summary
pub fn write_summary(
    w: &mut impl std::io::Write,
    aut: &ExplicitAutomaton,
    analysis: &Analysis,
) -> Result<()> {
    writeln!(w, "Parsed automaton:")?;
    writeln!(w, "  State bits:       {}", aut.num_state_bits)?;
    writeln!(w, "  States:           {}", aut.num_states)?;
    writeln!(w, "  Inputs:           {:?}", aut.input_labels)?;
    writeln!(w, "  Outputs:          {:?}", aut.output_labels)?;
    writeln!(w, "  Initial state:    {}", aut.initial_state)?;
    writeln!(w, "  Accepting states: {:?}", aut.accepting_states)?;
    writeln!(w, "  Edges:            {}", aut.edges.len())?;
    writeln!(w, "  Analyzed states:  {}", analysis.scope.len())?;
    writeln!(w, "  SCCs:             {}", analysis.sccs.len())?;
    Ok(())
}

/// Write the weakness report; silent when the automaton is weak
pub fn write_weakness_report(w: &mut impl std::io::Write, report: &WeaknessReport) -> Result<()> {
    if report.is_weak() {
        return Ok(());
    }

    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w, "{}", WEAKNESS_MARKER)?;
    writeln!(w, "{}", "=".repeat(60))?;
    for v in &report.violations {
        writeln!(w, "  Mixed SCC: {:?}", v.scc)?;
        writeln!(w, "    Accepting states: {:?}", v.accepting)?;
        writeln!(w, "    Rejecting states: {:?}", v.rejecting)?;
    }
    writeln!(w, "{}", "=".repeat(60))?;
    Ok(())
}
