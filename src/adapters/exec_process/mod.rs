//! Subprocess execution adapter
//!
//! Runs the downloader and transcoder with tokio's process API and resolves
//! them on PATH with `which`.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{ClipperError, ClipperResult};
use crate::ports::{ExitReport, Invocation, ProcessPort};

/// Where the tools' own console output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolOutput {
    /// Tool stdout and stderr both land on our stderr
    #[default]
    Forward,
    /// Discard everything the tools print
    Discard,
}

/// Process-spawning execution adapter
pub struct ExecProcessAdapter {
    timeout: Option<Duration>,
    output: ToolOutput,
}

impl ExecProcessAdapter {
    /// Create a new adapter with no timeout
    pub fn new() -> Self {
        Self {
            timeout: None,
            output: ToolOutput::Forward,
        }
    }

    /// Kill tools that run longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_output(mut self, output: ToolOutput) -> Self {
        self.output = output;
        self
    }

    fn build_command(&self, invocation: &Invocation) -> Command {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        match self.output {
            // stdout is reserved for result paths
            ToolOutput::Forward => {
                command.stdout(std::io::stderr());
            }
            ToolOutput::Discard => {
                command.stdout(Stdio::null()).stderr(Stdio::null());
            }
        }
        command
    }
}

impl Default for ExecProcessAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessPort for ExecProcessAdapter {
    async fn run(&self, invocation: &Invocation) -> ClipperResult<ExitReport> {
        debug!("Running: {}", invocation);

        let launch_error = |source| ClipperError::ToolLaunch {
            program: invocation.program.clone(),
            source,
        };

        let mut child = self.build_command(invocation).spawn().map_err(launch_error)?;

        let status = match self.timeout {
            Some(limit) => {
                let waited = tokio::time::timeout(limit, child.wait()).await;
                match waited {
                    Ok(status) => status,
                    Err(_) => {
                        warn!("{} exceeded {}s, killing it", invocation.program, limit.as_secs());
                        if let Err(e) = child.kill().await {
                            warn!("Failed to kill {}: {}", invocation.program, e);
                        }
                        return Err(ClipperError::ToolTimeout {
                            program: invocation.program.clone(),
                            seconds: limit.as_secs(),
                        });
                    }
                }
            }
            None => child.wait().await,
        }
        .map_err(launch_error)?;

        debug!("{} finished with {:?}", invocation.program, status.code());
        Ok(ExitReport {
            success: status.success(),
            code: status.code(),
        })
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}
