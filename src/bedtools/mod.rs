//! bedtools subprocess execution
//!
//! Validates input files, stages them into a scratch directory, and runs
//! the external bedtools binary with a timeout. No interval arithmetic
//! happens here; bedtools does all of it.

mod commands;
mod runner;

pub use commands::{IntersectArgs, MergeArgs, SortArgs};
pub use runner::BedtoolsRunner;
