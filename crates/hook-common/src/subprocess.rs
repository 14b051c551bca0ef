//! Subprocess execution with bounded timeouts.
//!
//! Every external tool (bd, dolt, git) is optional from a hook's point of
//! view. Callers treat any error here as "feature unavailable".

use duct::{Expression, Handle};
use std::path::Path;
use std::process::Output;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Timeout used for availability probes like `bd --version`.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum SubprocessError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },
}

/// Result of a command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal)
    pub exit_code: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
}

impl CommandResult {
    /// Create from std::process::Output.
    pub fn from_output(output: &Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        }
    }
}

/// Build an expression for an external tool.
///
/// On Windows, npm-installed tools are `.cmd` shims that only resolve
/// through the shell, so the program is routed through `cmd /C`.
pub fn tool(program: &str, args: &[&str]) -> Expression {
    if cfg!(target_os = "windows") {
        let mut shell_args = vec!["/C", program];
        shell_args.extend_from_slice(args);
        duct::cmd("cmd", shell_args)
    } else {
        duct::cmd(program, args)
    }
}

/// Run a tool with empty stdin and captured output, killing it after `timeout`.
pub fn run_tool(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
    timeout: Duration,
) -> Result<CommandResult, SubprocessError> {
    let mut expr = tool(program, args)
        .stdin_null()
        .stdout_capture()
        .stderr_capture()
        .unchecked();
    if let Some(dir) = cwd {
        expr = expr.dir(dir);
    }

    let handle = expr.start().map_err(|source| SubprocessError::Spawn {
        program: program.to_string(),
        source,
    })?;

    wait_with_timeout(&handle, program, timeout)
}

/// Poll a started expression until it exits or `timeout` elapses.
pub fn wait_with_timeout(
    handle: &Handle,
    program: &str,
    timeout: Duration,
) -> Result<CommandResult, SubprocessError> {
    let start = Instant::now();
    loop {
        match handle.try_wait() {
            Ok(Some(output)) => return Ok(CommandResult::from_output(output)),
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = handle.kill();
                    return Err(SubprocessError::Timeout {
                        program: program.to_string(),
                        timeout,
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(source) => {
                return Err(SubprocessError::Wait {
                    program: program.to_string(),
                    source,
                });
            }
        }
    }
}

/// Whether `program args...` runs and exits 0 within the probe timeout.
pub fn tool_available(program: &str, args: &[&str]) -> bool {
    run_tool(program, args, None, PROBE_TIMEOUT).is_ok_and(|result| result.success)
}

/// Run the tracker CLI in `cwd`.
pub fn bd(args: &[&str], cwd: &Path, timeout: Duration) -> Result<CommandResult, SubprocessError> {
    run_tool("bd", args, Some(cwd), timeout)
}

/// Run git in `cwd`.
pub fn git(args: &[&str], cwd: &Path, timeout: Duration) -> Result<CommandResult, SubprocessError> {
    run_tool("git", args, Some(cwd), timeout)
}
