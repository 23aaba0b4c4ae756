//! Settings struct and defaults

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime settings for the bedtools server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Maximum input file size in bytes
    pub max_file_size: u64,

    /// Directory for per-invocation scratch directories
    pub temp_dir: Option<PathBuf>,

    /// Command timeout in seconds
    pub timeout: u64,

    /// Path to the bedtools executable
    pub bedtools_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_file_size: 100_000_000,
            temp_dir: None,
            timeout: 300,
            bedtools_path: "bedtools".to_string(),
        }
    }
}

/// Partial settings as they appear in a config file. Every field is
/// optional so a file can override just one knob.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub max_file_size: Option<u64>,
    pub temp_dir: Option<PathBuf>,
    pub timeout: Option<u64>,
    pub bedtools_path: Option<String>,
}

impl Settings {
    pub(crate) fn merge_file(&mut self, file: FileConfig) {
        if let Some(v) = file.max_file_size {
            self.max_file_size = v;
        }
        if let Some(v) = file.temp_dir {
            self.temp_dir = Some(v);
        }
        if let Some(v) = file.timeout {
            self.timeout = v;
        }
        if let Some(v) = file.bedtools_path {
            self.bedtools_path = v;
        }
    }
}
