//! Test helpers shared across crates.
//!
//! This crate provides temporary configuration directories and small text
//! helpers for multi-line expected output.

pub mod files;
pub mod text;
