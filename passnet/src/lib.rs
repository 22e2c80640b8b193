//! Domain-agnostic building blocks for turning event logs into weighted graphs: JSON and CSV file
//! handling, insertion-ordered lookups, dense matrices and a handful of descriptive statistics.

pub mod csv;
pub mod file;
pub mod hash_lookup;
pub mod matrix;
pub mod stats;
pub mod timed;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
