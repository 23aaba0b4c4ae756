//! Runner for the external bedtools binary
//!
//! Each invocation gets its own scratch directory: inputs are copied in,
//! bedtools runs with the scratch directory as cwd, and the whole thing
//! is removed when the `TempDir` drops.

use crate::bedtools::{IntersectArgs, MergeArgs, SortArgs};
use crate::config::Settings;
use crate::types::BedtoolsError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

pub struct BedtoolsRunner {
    settings: Settings,
}

impl BedtoolsRunner {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Run `bedtools intersect` on two input files.
    pub async fn intersect(&self, args: &IntersectArgs) -> Result<String, BedtoolsError> {
        self.validate_input(&args.input_file_a)?;
        self.validate_input(&args.input_file_b)?;

        let scratch = self.scratch_dir()?;
        let staged_a = self.stage(scratch.path(), &args.input_file_a, None).await?;

        // Inputs from different directories can share a file name; keep
        // the second one distinct inside the scratch directory.
        let prefix = if file_name(&args.input_file_a)? == file_name(&args.input_file_b)? {
            Some("b_")
        } else {
            None
        };
        let staged_b = self.stage(scratch.path(), &args.input_file_b, prefix).await?;

        self.execute(&args.command_line(&staged_a, &staged_b), scratch.path())
            .await
    }

    /// Run `bedtools merge` on an input file.
    pub async fn merge(&self, args: &MergeArgs) -> Result<String, BedtoolsError> {
        self.validate_input(&args.input_file)?;

        let scratch = self.scratch_dir()?;
        let staged = self.stage(scratch.path(), &args.input_file, None).await?;

        self.execute(&args.command_line(&staged), scratch.path()).await
    }

    /// Run `bedtools sort` on an input file.
    pub async fn sort(&self, args: &SortArgs) -> Result<String, BedtoolsError> {
        self.validate_input(&args.input_file)?;

        let scratch = self.scratch_dir()?;
        let staged = self.stage(scratch.path(), &args.input_file, None).await?;

        self.execute(&args.command_line(&staged), scratch.path()).await
    }

    /// Check that an input file exists and is within the size limit.
    fn validate_input(&self, path: &Path) -> Result<(), BedtoolsError> {
        let metadata = std::fs::metadata(path)
            .map_err(|_| BedtoolsError::InputNotFound(path.to_path_buf()))?;

        if metadata.len() > self.settings.max_file_size {
            return Err(BedtoolsError::FileTooLarge {
                path: path.to_path_buf(),
                max: self.settings.max_file_size,
            });
        }

        Ok(())
    }

    /// Create the per-invocation scratch directory.
    fn scratch_dir(&self) -> Result<TempDir, BedtoolsError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("bedtools-mcp-");

        let dir = match &self.settings.temp_dir {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };

        debug!("Created scratch directory: {}", dir.path().display());
        Ok(dir)
    }

    /// Copy an input file into the scratch directory by file name.
    async fn stage(
        &self,
        scratch: &Path,
        input: &Path,
        prefix: Option<&str>,
    ) -> Result<PathBuf, BedtoolsError> {
        let name = file_name(input)?;
        let staged = match prefix {
            Some(p) => {
                let mut prefixed = std::ffi::OsString::from(p);
                prefixed.push(name);
                scratch.join(prefixed)
            }
            None => scratch.join(name),
        };

        tokio::fs::copy(input, &staged).await?;
        Ok(staged)
    }

    /// Spawn bedtools and wait for it under the configured timeout.
    async fn execute(&self, args: &[String], cwd: &Path) -> Result<String, BedtoolsError> {
        info!("Running {} {}", self.settings.bedtools_path, args.join(" "));

        let child = Command::new(&self.settings.bedtools_path)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BedtoolsError::ExecutableNotFound(self.settings.bedtools_path.clone())
                } else {
                    BedtoolsError::Io(e)
                }
            })?;

        // On timeout the output future is dropped and kill_on_drop reaps
        // the child.
        let output = match timeout(
            Duration::from_secs(self.settings.timeout),
            child.wait_with_output(),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => return Err(BedtoolsError::Timeout(self.settings.timeout)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(BedtoolsError::CommandFailed(stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn file_name(path: &Path) -> Result<&std::ffi::OsStr, BedtoolsError> {
    path.file_name().ok_or_else(|| {
        BedtoolsError::InvalidArguments(format!("Not a file path: {}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn runner_with(settings: Settings) -> BedtoolsRunner {
        BedtoolsRunner::new(settings)
    }

    fn write_bed(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[cfg(unix)]
    fn write_stub(dir: &Path, name: &str, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_missing_input_file() {
        let runner = runner_with(Settings::default());
        let args = SortArgs {
            input_file: PathBuf::from("/nonexistent/file.bed"),
        };

        let result = runner.sort(&args).await;
        assert!(matches!(result, Err(BedtoolsError::InputNotFound(_))));
    }

    #[tokio::test]
    async fn test_oversized_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_bed(dir.path(), "big.bed", "chr1\t100\t200\tfeature1\n");

        let settings = Settings {
            max_file_size: 4,
            ..Settings::default()
        };
        let runner = runner_with(settings);

        let result = runner
            .sort(&SortArgs { input_file: input })
            .await;
        assert!(matches!(result, Err(BedtoolsError::FileTooLarge { max: 4, .. })));
    }

    #[tokio::test]
    async fn test_missing_executable() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_bed(dir.path(), "in.bed", "chr1\t100\t200\n");

        let settings = Settings {
            bedtools_path: "/nonexistent/bedtools".to_string(),
            ..Settings::default()
        };
        let runner = runner_with(settings);

        let result = runner.sort(&SortArgs { input_file: input }).await;
        assert!(matches!(result, Err(BedtoolsError::ExecutableNotFound(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_run_captures_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_bed(dir.path(), "in.bed", "chr2\t100\t200\nchr1\t150\t250\n");
        let stub = write_stub(
            dir.path(),
            "bedtools",
            "#!/bin/sh\nprintf 'chr1\\t150\\t250\\nchr2\\t100\\t200\\n'\n",
        );

        let settings = Settings {
            bedtools_path: stub.display().to_string(),
            ..Settings::default()
        };
        let runner = runner_with(settings);

        let output = runner.sort(&SortArgs { input_file: input }).await.unwrap();
        assert_eq!(output, "chr1\t150\t250\nchr2\t100\t200\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_surfaces_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_bed(dir.path(), "in.bed", "chr1\t100\t200\n");
        let stub = write_stub(
            dir.path(),
            "bedtools",
            "#!/bin/sh\necho 'Error: malformed BED entry' >&2\nexit 1\n",
        );

        let settings = Settings {
            bedtools_path: stub.display().to_string(),
            ..Settings::default()
        };
        let runner = runner_with(settings);

        let result = runner.sort(&SortArgs { input_file: input }).await;
        match result {
            Err(BedtoolsError::CommandFailed(stderr)) => {
                assert!(stderr.contains("malformed BED entry"));
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_slow_command() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_bed(dir.path(), "in.bed", "chr1\t100\t200\n");
        let stub = write_stub(dir.path(), "bedtools", "#!/bin/sh\nsleep 30\n");

        let settings = Settings {
            bedtools_path: stub.display().to_string(),
            timeout: 1,
            ..Settings::default()
        };
        let runner = runner_with(settings);

        let result = runner.sort(&SortArgs { input_file: input }).await;
        assert!(matches!(result, Err(BedtoolsError::Timeout(1))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_intersect_stages_colliding_names() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        let input_a = write_bed(dir_a.path(), "x.bed", "chr1\t100\t200\n");
        let input_b = write_bed(dir_b.path(), "x.bed", "chr1\t150\t250\n");

        // Stub echoes its arguments so we can see both staged paths.
        let stub = write_stub(dir_a.path(), "bedtools", "#!/bin/sh\necho \"$@\"\n");

        let settings = Settings {
            bedtools_path: stub.display().to_string(),
            ..Settings::default()
        };
        let runner = runner_with(settings);

        let output = runner
            .intersect(&IntersectArgs {
                input_file_a: input_a,
                input_file_b: input_b,
                write_a: false,
                write_b: false,
                write_overlap: false,
            })
            .await
            .unwrap();

        assert!(output.contains("x.bed"));
        assert!(output.contains("b_x.bed"));
    }
}
