// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! One external compiler process, from spawn to exit.
//!
//! ```text
//! Spawned --> Streaming --> Succeeded
//!                      \--> Failed
//! ```
//!
//! stdout and stderr are drained by two pump tasks that append each chunk as
//! it arrives, so there is no single-read size ceiling and a full pipe never
//! stalls the child. The buffers are only handed out after the exit event.

use crate::errors::CompileError;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const CHUNK_SIZE: usize = 64 * 1024;

/// Lifecycle state of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    Spawned,
    Streaming,
    Succeeded,
    Failed,
}

impl fmt::Display for InvocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvocationState::Spawned => "spawned",
            InvocationState::Streaming => "streaming",
            InvocationState::Succeeded => "succeeded",
            InvocationState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Captured output of a successful invocation.
#[derive(Debug, Default)]
pub struct InvocationOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// A compiler command ready to be spawned.
#[derive(Debug, Clone)]
pub struct Invocation {
    executable: PathBuf,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(executable: impl Into<PathBuf>, args: Vec<OsString>) -> Self {
        Self {
            executable: executable.into(),
            args,
            current_dir: None,
        }
    }

    /// Run the process in `dir` instead of the host's working directory.
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Start the process and its output pumps.
    pub fn spawn(self) -> Result<RunningInvocation, CompileError> {
        let mut command = Command::new(&self.executable);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        let mut child = command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CompileError::Spawn {
                executable: self.executable.clone(),
                source,
            })?;

        let stdout = child.stdout.take().map(|out| tokio::spawn(pump(out)));
        let stderr = child.stderr.take().map(|err| tokio::spawn(pump(err)));

        let mut running = RunningInvocation {
            executable: self.executable,
            child,
            stdout,
            stderr,
            cancel: CancellationToken::new(),
            state: InvocationState::Spawned,
        };
        running.transition(InvocationState::Streaming);
        Ok(running)
    }

    /// Spawn and wait in one step.
    pub async fn run(self) -> Result<InvocationOutput, CompileError> {
        self.spawn()?.wait().await
    }
}

/// A spawned compiler process whose output is being collected.
///
/// Dropping it kills the child.
pub struct RunningInvocation {
    executable: PathBuf,
    child: Child,
    stdout: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    stderr: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    cancel: CancellationToken,
    state: InvocationState,
}

impl RunningInvocation {
    pub fn state(&self) -> InvocationState {
        self.state
    }

    /// Token that kills the process when cancelled.
    ///
    /// Hook for deadlines: a caller can cancel it from a timer.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait for exit and collect the accumulated output.
    ///
    /// Non-zero exit yields [`CompileError::ExitStatus`] with the captured
    /// stderr as its diagnostics.
    pub async fn wait(mut self) -> Result<InvocationOutput, CompileError> {
        let status = tokio::select! {
            status = self.child.wait() => status,
            _ = self.cancel.cancelled() => {
                if let Err(error) = self.child.kill().await {
                    tracing::warn!(executable = %self.executable.display(), %error, "failed to kill cancelled typst process");
                }
                self.transition(InvocationState::Failed);
                return Err(CompileError::Cancelled);
            }
        };

        let status = match status {
            Ok(status) => status,
            Err(error) => {
                self.transition(InvocationState::Failed);
                return Err(CompileError::Io(error));
            }
        };

        let stdout = collect(self.stdout.take()).await;
        let stderr = collect(self.stderr.take()).await;
        self.finish(status, stdout, stderr)
    }

    fn finish(
        &mut self,
        status: ExitStatus,
        stdout: std::io::Result<Vec<u8>>,
        stderr: std::io::Result<Vec<u8>>,
    ) -> Result<InvocationOutput, CompileError> {
        if !status.success() {
            self.transition(InvocationState::Failed);
            let stderr = stderr.unwrap_or_default();
            return Err(CompileError::ExitStatus {
                code: status.code(),
                stderr: String::from_utf8_lossy(&stderr).into_owned(),
            });
        }

        match (stdout, stderr) {
            (Ok(stdout), Ok(stderr)) => {
                self.transition(InvocationState::Succeeded);
                Ok(InvocationOutput { stdout, stderr })
            }
            (Err(error), _) | (_, Err(error)) => {
                self.transition(InvocationState::Failed);
                Err(CompileError::Io(error))
            }
        }
    }

    fn transition(&mut self, next: InvocationState) {
        tracing::trace!(
            executable = %self.executable.display(),
            from = %self.state,
            to = %next,
            "typst invocation state change"
        );
        self.state = next;
    }
}

/// Drain a stream, appending each chunk in arrival order.
async fn pump<R: AsyncRead + Unpin>(mut reader: R) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let read = reader.read(&mut chunk).await?;
        if read == 0 {
            return Ok(buffer);
        }
        buffer.extend_from_slice(&chunk[..read]);
    }
}

async fn collect(pump: Option<JoinHandle<std::io::Result<Vec<u8>>>>) -> std::io::Result<Vec<u8>> {
    match pump {
        Some(handle) => handle.await.map_err(std::io::Error::other)?,
        None => Ok(Vec::new()),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sh(script: &str) -> Invocation {
        Invocation::new("/bin/sh", vec!["-c".into(), script.into()])
    }

    #[tokio::test]
    async fn collects_stdout_and_stderr_on_success() {
        let output = sh("printf out; printf err >&2").run().await.unwrap();
        assert_eq!(output.stdout, b"out");
        assert_eq!(output.stderr, b"err");
    }

    #[tokio::test]
    async fn non_zero_exit_carries_code_and_stderr() {
        let err = sh("echo 'error: unknown variable: x' >&2; exit 2")
            .run()
            .await
            .unwrap_err();

        match err {
            CompileError::ExitStatus { code, stderr } => {
                assert_eq!(code, Some(2));
                assert!(stderr.contains("unknown variable"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_executable_is_a_spawn_error() {
        let err = Invocation::new("/nonexistent/typst", vec![])
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, CompileError::Spawn { .. }));
    }

    #[tokio::test]
    async fn runs_in_the_requested_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = sh("pwd -P")
            .with_current_dir(dir.path())
            .run()
            .await
            .unwrap();

        let reported = String::from_utf8(output.stdout).unwrap();
        assert_eq!(
            Path::new(reported.trim()),
            dir.path().canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn large_output_is_streamed_completely() {
        // 4 MiB, far beyond a single pipe buffer.
        let output = sh("head -c 4194304 /dev/zero").run().await.unwrap();
        assert_eq!(output.stdout.len(), 4 * 1024 * 1024);
    }

    #[tokio::test]
    async fn state_moves_to_streaming_after_spawn() {
        let running = sh("exit 0").spawn().unwrap();
        assert_eq!(running.state(), InvocationState::Streaming);
        running.wait().await.unwrap();
    }

    #[tokio::test]
    async fn cancellation_kills_the_process() {
        let running = sh("sleep 30").spawn().unwrap();
        let token = running.cancel_token();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        });

        let result = tokio::time::timeout(Duration::from_secs(10), running.wait())
            .await
            .expect("cancelled invocation should finish promptly");
        assert!(matches!(result, Err(CompileError::Cancelled)));
    }
}
