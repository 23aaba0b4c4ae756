//! Per-subcommand argument structs and command-line builders
//!
//! Each struct deserializes directly from MCP tool-call arguments. The
//! `command_line` methods take the staged (already copied) input paths,
//! not the caller's originals.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Arguments for `bedtools intersect`.
#[derive(Debug, Deserialize)]
pub struct IntersectArgs {
    pub input_file_a: PathBuf,
    pub input_file_b: PathBuf,
    /// Write the original entry in A for each overlap (-wa)
    #[serde(default)]
    pub write_a: bool,
    /// Write the original entry in B for each overlap (-wb)
    #[serde(default)]
    pub write_b: bool,
    /// Write the amount of overlap between features (-wo)
    #[serde(default)]
    pub write_overlap: bool,
}

impl IntersectArgs {
    pub(crate) fn command_line(&self, staged_a: &Path, staged_b: &Path) -> Vec<String> {
        let mut cmd = vec![
            "intersect".to_string(),
            "-a".to_string(),
            staged_a.display().to_string(),
            "-b".to_string(),
            staged_b.display().to_string(),
        ];

        if self.write_a {
            cmd.push("-wa".to_string());
        }
        if self.write_b {
            cmd.push("-wb".to_string());
        }
        if self.write_overlap {
            cmd.push("-wo".to_string());
        }

        cmd
    }
}

/// Arguments for `bedtools merge`.
#[derive(Debug, Deserialize)]
pub struct MergeArgs {
    pub input_file: PathBuf,
    /// Maximum distance between features for merging (-d)
    #[serde(default)]
    pub distance: i64,
}

impl MergeArgs {
    pub(crate) fn command_line(&self, staged: &Path) -> Vec<String> {
        let mut cmd = vec![
            "merge".to_string(),
            "-i".to_string(),
            staged.display().to_string(),
        ];

        // bedtools treats 0 as "touching features only", which is its
        // default; only pass -d when the caller asked for more.
        if self.distance > 0 {
            cmd.push("-d".to_string());
            cmd.push(self.distance.to_string());
        }

        cmd
    }
}

/// Arguments for `bedtools sort`.
#[derive(Debug, Deserialize)]
pub struct SortArgs {
    pub input_file: PathBuf,
}

impl SortArgs {
    pub(crate) fn command_line(&self, staged: &Path) -> Vec<String> {
        vec![
            "sort".to_string(),
            "-i".to_string(),
            staged.display().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_command_line_minimal() {
        let args = IntersectArgs {
            input_file_a: PathBuf::from("a.bed"),
            input_file_b: PathBuf::from("b.bed"),
            write_a: false,
            write_b: false,
            write_overlap: false,
        };

        let cmd = args.command_line(Path::new("/tmp/x/a.bed"), Path::new("/tmp/x/b.bed"));
        assert_eq!(cmd, vec!["intersect", "-a", "/tmp/x/a.bed", "-b", "/tmp/x/b.bed"]);
    }

    #[test]
    fn test_intersect_command_line_all_flags() {
        let args = IntersectArgs {
            input_file_a: PathBuf::from("a.bed"),
            input_file_b: PathBuf::from("b.bed"),
            write_a: true,
            write_b: true,
            write_overlap: true,
        };

        let cmd = args.command_line(Path::new("a.bed"), Path::new("b.bed"));
        assert_eq!(&cmd[5..], &["-wa", "-wb", "-wo"]);
    }

    #[test]
    fn test_merge_omits_distance_when_zero() {
        let args = MergeArgs {
            input_file: PathBuf::from("in.bed"),
            distance: 0,
        };

        let cmd = args.command_line(Path::new("in.bed"));
        assert_eq!(cmd, vec!["merge", "-i", "in.bed"]);
    }

    #[test]
    fn test_merge_includes_positive_distance() {
        let args = MergeArgs {
            input_file: PathBuf::from("in.bed"),
            distance: 100,
        };

        let cmd = args.command_line(Path::new("in.bed"));
        assert_eq!(cmd, vec!["merge", "-i", "in.bed", "-d", "100"]);
    }

    #[test]
    fn test_sort_command_line() {
        let args = SortArgs {
            input_file: PathBuf::from("in.bed"),
        };

        let cmd = args.command_line(Path::new("/scratch/in.bed"));
        assert_eq!(cmd, vec!["sort", "-i", "/scratch/in.bed"]);
    }

    #[test]
    fn test_intersect_args_deserialize_with_defaults() {
        let args: IntersectArgs = serde_json::from_value(serde_json::json!({
            "input_file_a": "/data/a.bed",
            "input_file_b": "/data/b.bed"
        }))
        .unwrap();

        assert!(!args.write_a);
        assert!(!args.write_b);
        assert!(!args.write_overlap);
    }

    #[test]
    fn test_merge_args_require_input_file() {
        let result: Result<MergeArgs, _> =
            serde_json::from_value(serde_json::json!({ "distance": 10 }));
        assert!(result.is_err());
    }
}
