//! Dependency convergence engine: exclude-pattern filtering, conflict
//! detection over a resolved tree, path reports, and the enforcing rule.

pub mod detector;
pub mod filter;
pub mod report;
pub mod rule;
pub mod version;
