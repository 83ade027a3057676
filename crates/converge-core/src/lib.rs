//! Core data types for converge.
//!
//! Artifact coordinates and scopes, the arena-backed resolved dependency
//! tree, and the rule configuration read from `Converge.toml`.

pub mod artifact;
pub mod config;
pub mod tree;
