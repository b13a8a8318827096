use crate::shared::config::ProcessorConfig;

/// Builds processor settings that run a `/bin/sh` script instead of `jp`.
///
/// The query expression is appended after the script, so inside the script it
/// is available as `$0`.
pub struct ProcessorFactory {
    config: ProcessorConfig,
}

impl ProcessorFactory {
    pub fn new() -> Self {
        Self {
            config: ProcessorConfig {
                path: "/bin/sh".into(),
                args: vec!["-c".into(), "cat".into()],
                timeout_ms: 5_000,
                ..ProcessorConfig::default()
            },
        }
    }

    /// Echoes stdin back: the identity query.
    pub fn identity(self) -> Self {
        self.script("cat")
    }

    /// Prints the query expression itself, ignoring stdin.
    pub fn echo_query(self) -> Self {
        self.script(r#"printf '%s\n' "$0""#)
    }

    pub fn script(mut self, script: &str) -> Self {
        self.config.path = "/bin/sh".into();
        self.config.args = vec!["-c".into(), script.into()];
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.config.path = path.into();
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.timeout_ms = timeout_ms;
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.read_chunk_size = chunk_size;
        self
    }

    pub fn stderr_limit(mut self, bytes: usize) -> Self {
        self.config.capture_stderr_bytes = bytes;
        self
    }

    pub fn create(self) -> ProcessorConfig {
        self.config
    }
}
