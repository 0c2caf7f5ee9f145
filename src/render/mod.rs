//! Render module - guard minimization and DOT document generation

pub mod dot;
pub mod guard;

// Re-export key types
pub use dot::{DotOptions, SCC_PALETTE, render_dot};
pub use guard::{GuardVars, MinimizeCapability, guard_label};
