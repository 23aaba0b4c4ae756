//! bedtools-mcp - Model Context Protocol server for bedtools
//!
//! This crate exposes the external `bedtools` genomic-interval toolkit as
//! MCP tools over stdio, so LLM clients can run intersect/merge/sort
//! against files on disk. The crate itself does no interval arithmetic:
//! it marshals arguments, guards file sizes and timeouts, and manages
//! per-invocation scratch directories around the bedtools subprocess.

pub mod bedtools;
pub mod config;
pub mod mcp;
pub mod types;

pub use bedtools::BedtoolsRunner;
pub use config::Settings;
pub use mcp::McpServer;
pub use types::BedtoolsError;
