use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BedtoolsError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("File too large. Maximum size: {max} bytes")]
    FileTooLarge { path: PathBuf, max: u64 },

    #[error("Command timed out after {0} seconds")]
    Timeout(u64),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("bedtools not found: {0}. Install bedtools or set BIO_MCP_BEDTOOLS_PATH")]
    ExecutableNotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BedtoolsError>;
