//! Shared types

mod errors;

pub use errors::{BedtoolsError, Result};
