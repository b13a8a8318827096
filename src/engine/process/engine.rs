use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStdin, Command};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::handle::ProcessHandle;
use crate::engine::errors::ProcessError;
use crate::engine::types::{RawDocument, RawResult};
use crate::shared::config::{CONFIG, ProcessorConfig};

/// Runs the external query processor once per call.
#[derive(Debug, Clone)]
pub struct QueryProcessEngine {
    settings: ProcessorConfig,
}

struct Exchange {
    output: Vec<u8>,
    stderr: String,
}

impl QueryProcessEngine {
    pub fn new(settings: ProcessorConfig) -> Self {
        Self { settings }
    }

    pub fn from_config() -> Self {
        Self::new(CONFIG.processor.clone())
    }

    pub fn settings(&self) -> &ProcessorConfig {
        &self.settings
    }

    /// `path [args...] <query>`. The query goes through argv untouched, never a shell.
    pub fn command_for(&self, query: &str) -> Command {
        let mut command = Command::new(&self.settings.path);
        command.args(&self.settings.args).arg(query);
        command
    }

    /// Feeds `input` to the processor and collects its stdout until it exits.
    ///
    /// A nonzero exit yields [`ProcessError::Exit`] carrying whatever output was
    /// produced. On every error path the child is killed and reaped before
    /// returning.
    pub async fn run(&self, input: &RawDocument, query: &str) -> Result<RawResult, ProcessError> {
        let mut handle = ProcessHandle::spawn(self.command_for(query))?;
        let pid = handle.pid();

        let limit = self.settings.timeout();
        let outcome = match timeout(limit, self.exchange(&mut handle, input.as_bytes())).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(
                    target: "jmesq::process",
                    pid,
                    timeout_ms = self.settings.timeout_ms,
                    "Processor timed out"
                );
                Err(ProcessError::Timeout(self.settings.timeout_ms))
            }
        };

        let exchange = match outcome {
            Ok(exchange) => exchange,
            Err(e) => {
                handle.abort().await;
                return Err(e);
            }
        };

        let status = handle.status().ok_or(ProcessError::ChannelSetup("exit status"))?;
        let output = RawResult::from_bytes(exchange.output);

        if !status.success() {
            warn!(
                target: "jmesq::process",
                pid,
                code = status.code(),
                output_bytes = output.len(),
                stderr = %exchange.stderr,
                "Processor exited unsuccessfully"
            );
            return Err(ProcessError::Exit {
                code: status.code(),
                stderr: exchange.stderr,
                output,
            });
        }

        info!(
            target: "jmesq::process",
            pid,
            input_bytes = input.len(),
            output_bytes = output.len(),
            "Processor finished"
        );
        Ok(output)
    }

    async fn exchange(
        &self,
        handle: &mut ProcessHandle,
        input: &[u8],
    ) -> Result<Exchange, ProcessError> {
        let stdin = handle.take_stdin()?;
        let stdout = handle.take_stdout()?;
        let stderr = handle.take_stderr()?;

        let chunk = self.settings.read_chunk_size.max(1);
        let (written, output, diagnostics) = tokio::join!(
            feed(stdin, input),
            drain(stdout, chunk, usize::MAX),
            drain(stderr, chunk, self.settings.capture_stderr_bytes),
        );
        written?;
        let output = output.map_err(ProcessError::StdoutRead)?;
        // stderr is diagnostics only
        let diagnostics = diagnostics.unwrap_or_default();

        handle.wait().await?;

        Ok(Exchange {
            output,
            stderr: String::from_utf8_lossy(&diagnostics).trim_end().to_string(),
        })
    }
}

/// Writes all of `input` and closes the pipe so the child sees end-of-input.
async fn feed(mut stdin: ChildStdin, input: &[u8]) -> Result<(), ProcessError> {
    match stdin.write_all(input).await {
        Ok(()) => {}
        // The child may legitimately exit without consuming its input
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!(target: "jmesq::process", "Processor closed stdin early");
            return Ok(());
        }
        Err(e) => return Err(ProcessError::StdinWrite(e)),
    }
    match stdin.shutdown().await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(ProcessError::StdinWrite(e)),
    }
}

/// Reads `reader` to end-of-stream in `chunk`-sized reads, keeping at most `keep` bytes.
async fn drain<R: AsyncRead + Unpin>(mut reader: R, chunk: usize, keep: usize) -> io::Result<Vec<u8>> {
    let mut buffer = vec![0u8; chunk];
    let mut collected = Vec::new();
    loop {
        let n = reader.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        let room = keep.saturating_sub(collected.len());
        collected.extend_from_slice(&buffer[..n.min(room)]);
    }
    Ok(collected)
}
