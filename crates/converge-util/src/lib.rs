//! Shared utilities for converge.
//!
//! This crate provides the cross-cutting error type used by all other
//! converge crates.

pub mod errors;
