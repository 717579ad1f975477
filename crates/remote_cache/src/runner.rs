//! Subprocess seam. Production code shells out through [`ProcessRunner`];
//! tests substitute a scripted runner.

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::RemoteCacheError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program args..` to completion. A non-zero exit is an error.
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, RemoteCacheError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, RemoteCacheError> {
        tracing::debug!(program, ?args, "spawning subprocess");
        let output = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| RemoteCacheError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(RemoteCacheError::CommandFailed {
                program: program.to_string(),
                args: args.join(" "),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let err = ProcessRunner
            .run("definitely-not-a-real-binary-1b7c", &["--version"])
            .await
            .expect_err("should fail");
        assert!(matches!(err, RemoteCacheError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout_and_rejects_non_zero_exit() {
        let ok = ProcessRunner
            .run("sh", &["-c", "printf 'hello\\n'"])
            .await
            .expect("sh runs");
        assert_eq!(ok.stdout, "hello\n");

        let err = ProcessRunner
            .run("sh", &["-c", "echo nope >&2; exit 3"])
            .await
            .expect_err("non-zero exit");
        match err {
            RemoteCacheError::CommandFailed { stderr, .. } => assert_eq!(stderr, "nope"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
