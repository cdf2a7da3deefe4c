//! External command execution.
//!
//! Every toolchain and listing invocation goes through [`CommandRunner`] so the
//! pipeline can be driven without a real toolchain. Commands run to completion
//! synchronously with stdout and stderr captured; there is no timeout.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use modinit_core::{InitError, Result};
use tracing::debug;

/// A program and its argument vector.
///
/// Arguments are passed to the process as-is, never through a shell. The
/// program is kept as an [`OsString`] so a resolved path reaches the process
/// byte-for-byte even when it is not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command with no arguments.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub exit_code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and stderr.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Runs external commands on behalf of the initializer.
pub trait CommandRunner {
    /// Run `spec` in `cwd`, blocking until it exits.
    ///
    /// Returns `Err` only when the process could not be started.
    fn run(&self, spec: &CommandSpec, cwd: &Path) -> std::io::Result<CommandOutput>;

    /// Resolve a program on the search path.
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    /// Directories searched by [`CommandRunner::locate`].
    fn search_path(&self) -> Vec<PathBuf> {
        std::env::var_os("PATH")
            .map(|path| std::env::split_paths(&path).collect())
            .unwrap_or_default()
    }
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec, cwd: &Path) -> std::io::Result<CommandOutput> {
        debug!(command = %spec, cwd = %cwd.display(), "running command");

        let output = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(cwd)
            .output()?;

        let result = CommandOutput {
            exit_code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(command = %spec, exit_code = ?result.exit_code, "command finished");
        Ok(result)
    }
}

/// Run a command and treat a nonzero exit as an error.
///
/// The error carries the captured stderr verbatim.
pub fn run_checked<R: CommandRunner + ?Sized>(
    runner: &R,
    spec: &CommandSpec,
    cwd: &Path,
) -> Result<CommandOutput> {
    let output = runner
        .run(spec, cwd)
        .map_err(|e| InitError::command_spawn(spec.to_string(), e))?;

    if !output.success {
        return Err(InitError::command_failed(
            spec.to_string(),
            output.exit_code,
            output.stderr,
        ));
    }

    Ok(output)
}
