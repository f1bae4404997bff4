//! Process Relay - hands each request to an external generation process.
//!
//! The process is invoked as `<program> <args...> <purpose>` with the user's
//! input on stdin. Its stdout must be one JSON reply; anything it writes to
//! stderr is returned verbatim as a diagnostic.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::RelayConfig;
use crate::domain::foundation::Purpose;
use crate::domain::guide::ServiceReply;
use crate::ports::{BackendError, ReplyBackend};

#[derive(Debug, Clone)]
pub struct ProcessRelay {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout: Duration,
}

impl ProcessRelay {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
            timeout,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args_list(),
            working_dir: config.working_dir.clone(),
            timeout: config.timeout(),
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn command(&self, purpose: Purpose) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(purpose.as_str())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// Turns captured process output into a reply or a backend error.
fn interpret_output(output: std::process::Output) -> Result<ServiceReply, BackendError> {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return Err(BackendError::Diagnostic(stderr.to_string()));
    }
    if !output.status.success() {
        return Err(BackendError::Diagnostic(format!(
            "Generation process exited with {}",
            output.status
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim())
        .map_err(|e| BackendError::MalformedOutput(e.to_string()))
}

#[async_trait]
impl ReplyBackend for ProcessRelay {
    async fn generate(&self, purpose: Purpose, user_input: &str) -> Result<ServiceReply, BackendError> {
        let mut child = self
            .command(purpose)
            .spawn()
            .map_err(|e| BackendError::Spawn(format!("{}: {}", self.program, e)))?;

        // Feed stdin while draining stdout and stderr, or a process that
        // echoes as it reads stalls once both pipe buffers are full
        let stdin = child.stdin.take();
        let write_input = async move {
            if let Some(mut stdin) = stdin {
                match stdin.write_all(user_input.as_bytes()).await {
                    // The process may exit without reading its input
                    Err(e) if e.kind() != ErrorKind::BrokenPipe => {
                        return Err(BackendError::Io(e.to_string()));
                    }
                    _ => {}
                }
            }
            Ok(())
        };
        let run = async {
            let (written, output) = tokio::join!(write_input, child.wait_with_output());
            written?;
            output.map_err(|e| BackendError::Io(e.to_string()))
        };

        let output = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| BackendError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            })??;

        tracing::debug!(%purpose, status = %output.status, "generation process finished");
        interpret_output(output)
    }

    fn name(&self) -> &'static str {
        "process"
    }
}
