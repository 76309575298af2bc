//! Shell-backed command runner.
//!
//! Runs each command line as `<shell> -c <line>` and waits for it, the way
//! `system(3)` does. Standard streams are inherited from the calling
//! process. There is no timeout: a command that never exits blocks the
//! caller forever.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use hwhook_core::{CommandRunner, errno};

/// Default shell used to run command lines.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Command runner spawning a shell per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellRunner {
    shell: PathBuf,
}

impl ShellRunner {
    /// Create a runner using `shell`.
    pub fn new(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    /// Shell used by this runner.
    pub fn shell(&self) -> &Path {
        &self.shell
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command_line: &str) -> i32 {
        tracing::info!(shell = %self.shell.display(), command = command_line.trim_end(), "running command");
        match Command::new(&self.shell).arg("-c").arg(command_line).status() {
            Ok(status) => {
                let code = exit_status_code(status);
                if code != 0 {
                    tracing::warn!(status = code, command = command_line.trim_end(), "command exited non-zero");
                }
                code
            }
            Err(e) => {
                tracing::warn!(shell = %self.shell.display(), error = %e, "failed to spawn shell");
                -e.raw_os_error().unwrap_or(errno::EIO)
            }
        }
    }
}

/// Convert a process exit status to the runner's OS-style status.
///
/// Normal exit yields the exit code. Death by signal yields `128 + signal`,
/// as shells report it.
pub fn exit_status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    errno::EIO
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn success_is_zero() {
        assert_eq!(ShellRunner::default().run("true"), 0);
    }

    #[test]
    fn exit_code_is_returned() {
        assert_eq!(ShellRunner::default().run("exit 2"), 2);
    }

    #[test]
    fn trailing_newline_is_accepted() {
        assert_eq!(ShellRunner::default().run("test 1 -eq 1\n"), 0);
    }

    #[test]
    fn signal_death_is_offset() {
        assert_eq!(ShellRunner::default().run("kill -9 $$"), 128 + 9);
    }

    #[test]
    fn missing_shell_is_negative() {
        let status = ShellRunner::new("/nonexistent/hwhook/sh").run("true");
        assert!(status < 0, "got {status}");
    }
}
