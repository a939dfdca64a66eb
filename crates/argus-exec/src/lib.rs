//! # argus-exec
//!
//! Host command execution for authorized senders.
//!
//! Two paths: [`CommandExecutor::run_shell`] passes a command line
//! through `sh -c` unescaped — the deliberate high-risk capability
//! reserved for unrestricted-shell senders — and
//! [`CommandExecutor::run_argv`] spawns an argument vector directly
//! with no shell interpretation. Both prepend a local `bin/` directory
//! to the child's search path, capture combined stdout+stderr, and
//! block until the child exits. There is no timeout: a hung command
//! stalls the whole message loop (known limitation).

use argus_core::message::CommandResult;
use std::ffi::OsString;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Runs authorized commands and captures their output.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    bin_dir: PathBuf,
}

impl CommandExecutor {
    /// `bin_dir` is prepended to `PATH` for every child, so operator
    /// tooling dropped into it shadows system binaries.
    pub fn new(bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: bin_dir.into(),
        }
    }

    /// Run a raw command line through the shell.
    pub async fn run_shell(&self, line: &str) -> CommandResult {
        debug!("shell exec: {line}");
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(line);
        self.capture(cmd).await
    }

    /// Run an argument vector directly, no shell interpretation.
    pub async fn run_argv(&self, argv: &[String]) -> CommandResult {
        debug!("argv exec: {argv:?}");
        let Some((program, args)) = argv.split_first() else {
            return CommandResult {
                success: false,
                output: "empty argument vector".to_string(),
            };
        };
        let mut cmd = Command::new(program);
        cmd.args(args);
        self.capture(cmd).await
    }

    /// The child's search path: `bin_dir` ahead of the inherited `PATH`.
    fn search_path(&self) -> OsString {
        let mut path = self.bin_dir.as_os_str().to_os_string();
        if let Some(inherited) = std::env::var_os("PATH") {
            path.push(":");
            path.push(inherited);
        }
        path
    }

    /// Run the prepared command to completion and fold the outcome into
    /// a [`CommandResult`]. Launch failures become failed results, never
    /// a crashed session.
    async fn capture(&self, mut cmd: Command) -> CommandResult {
        cmd.env("PATH", self.search_path());

        let output = match cmd.output().await {
            Ok(out) => out,
            Err(e) => {
                return CommandResult {
                    success: false,
                    output: format!("failed to launch command: {e}"),
                }
            }
        };

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&stderr);
        }

        CommandResult {
            success: output.status.success(),
            output: text,
        }
    }
}
