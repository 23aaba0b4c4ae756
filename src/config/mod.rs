//! Server configuration
//!
//! Settings come from four layers, highest priority first:
//! 1. CLI flags (applied in `main`)
//! 2. `BIO_MCP_*` environment variables
//! 3. Optional TOML config file
//! 4. Built-in defaults

mod loader;
mod settings;

pub use settings::Settings;
