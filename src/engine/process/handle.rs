use std::process::{ExitStatus, Stdio};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tracing::{debug, warn};

use crate::engine::errors::ProcessError;

/// Owns one processor child and all three of its pipes.
///
/// The exit status is collected exactly once, through [`wait`](Self::wait) or
/// [`abort`](Self::abort). A handle dropped before either kills the child; the
/// runtime then reaps it in the background.
#[derive(Debug)]
pub struct ProcessHandle {
    child: Child,
    pid: Option<u32>,
    stdin: Option<ChildStdin>,
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
    status: Option<ExitStatus>,
}

impl ProcessHandle {
    pub fn spawn(mut command: Command) -> Result<Self, ProcessError> {
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let program = command.as_std().get_program().to_string_lossy().into_owned();
        let mut child = command
            .spawn()
            .map_err(|source| ProcessError::Spawn { program, source })?;

        let handle = Self {
            pid: child.id(),
            stdin: child.stdin.take(),
            stdout: child.stdout.take(),
            stderr: child.stderr.take(),
            status: None,
            child,
        };

        // A partially built handle still kills and releases the child on drop
        if handle.stdin.is_none() {
            return Err(ProcessError::ChannelSetup("stdin"));
        }
        if handle.stdout.is_none() {
            return Err(ProcessError::ChannelSetup("stdout"));
        }
        if handle.stderr.is_none() {
            return Err(ProcessError::ChannelSetup("stderr"));
        }

        debug!(target: "jmesq::process", pid = handle.pid, "Processor spawned");
        Ok(handle)
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn take_stdin(&mut self) -> Result<ChildStdin, ProcessError> {
        self.stdin.take().ok_or(ProcessError::ChannelSetup("stdin"))
    }

    pub fn take_stdout(&mut self) -> Result<ChildStdout, ProcessError> {
        self.stdout.take().ok_or(ProcessError::ChannelSetup("stdout"))
    }

    pub fn take_stderr(&mut self) -> Result<ChildStderr, ProcessError> {
        self.stderr.take().ok_or(ProcessError::ChannelSetup("stderr"))
    }

    pub fn is_reaped(&self) -> bool {
        self.status.is_some()
    }

    pub fn status(&self) -> Option<ExitStatus> {
        self.status
    }

    fn close_channels(&mut self) {
        self.stdin.take();
        self.stdout.take();
        self.stderr.take();
    }

    /// Closes any pipe still held and waits for the child to exit.
    pub async fn wait(&mut self) -> Result<ExitStatus, ProcessError> {
        if let Some(status) = self.status {
            return Ok(status);
        }
        self.close_channels();
        let status = self.child.wait().await.map_err(ProcessError::Wait)?;
        self.status = Some(status);
        debug!(target: "jmesq::process", pid = self.pid, code = status.code(), "Processor reaped");
        Ok(status)
    }

    /// Kills the child if it is still running and reaps it.
    pub async fn abort(&mut self) {
        if self.status.is_some() {
            return;
        }
        self.close_channels();
        if let Err(e) = self.child.start_kill() {
            // Already exited on its own; the wait below still reaps it
            debug!(target: "jmesq::process", pid = self.pid, error = %e, "Kill not delivered");
        }
        match self.child.wait().await {
            Ok(status) => {
                self.status = Some(status);
                debug!(target: "jmesq::process", pid = self.pid, "Processor aborted and reaped");
            }
            Err(e) => {
                warn!(target: "jmesq::process", pid = self.pid, error = %e, "Failed to reap aborted processor");
            }
        }
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        if self.status.is_some() {
            return;
        }
        self.close_channels();
        let _ = self.child.start_kill();
        if let Ok(Some(status)) = self.child.try_wait() {
            self.status = Some(status);
        }
    }
}
