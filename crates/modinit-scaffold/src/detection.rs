//! Toolchain detection.
//!
//! Locates the Go toolchain on the search path and checks it with
//! `go version`. Detection is an availability check only; the version string
//! is recorded for the report and never compared against a minimum.

use std::path::{Path, PathBuf};

use modinit_core::{InitError, Result};
use tracing::{debug, info};

use crate::command::{CommandRunner, CommandSpec};

/// Information about the detected toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainDetection {
    /// Name the toolchain was looked up by (e.g., "go").
    pub name: String,

    /// Full path to the executable binary.
    pub binary_path: PathBuf,

    /// First line of the version query output (e.g., "go version go1.22.0 linux/amd64").
    pub version: Option<String>,
}

impl ToolchainDetection {
    /// Create a new detection result.
    pub fn new(name: impl Into<String>, binary_path: PathBuf) -> Self {
        Self {
            name: name.into(),
            binary_path,
            version: None,
        }
    }

    /// Set the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Build a toolchain subcommand, e.g. `go mod tidy`.
    ///
    /// Uses the resolved binary path so every invocation hits the same toolchain.
    pub fn command<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new(&self.binary_path).args(args)
    }
}

/// Locate `name` and run its version query.
///
/// Fails with [`InitError::ToolchainNotFound`] when the binary is not on the
/// search path or cannot be started, and with [`InitError::ToolchainUnusable`]
/// when `version` exits nonzero.
pub fn detect_toolchain<R: CommandRunner + ?Sized>(
    runner: &R,
    name: &str,
    cwd: &Path,
) -> Result<ToolchainDetection> {
    debug!(toolchain = name, "detecting toolchain");

    let Some(binary_path) = runner.locate(name) else {
        debug!(toolchain = name, "toolchain not found in PATH");
        return Err(InitError::toolchain_not_found(
            name,
            format!("{name} not found in PATH"),
        ));
    };

    let mut detection = ToolchainDetection::new(name, binary_path.clone());
    let spec = detection.command(["version"]);

    let output = runner.run(&spec, cwd).map_err(|e| {
        InitError::toolchain_not_found(
            name,
            format!("found at {} but failed to start: {e}", binary_path.display()),
        )
    })?;

    if !output.success {
        return Err(InitError::ToolchainUnusable {
            name: name.to_string(),
            binary_path,
            stderr: output.stderr,
        });
    }

    if let Some(line) = output.stdout.lines().next().map(str::trim)
        && !line.is_empty()
    {
        detection = detection.with_version(line);
    }

    info!(
        "Toolchain detected: {} ({})",
        detection.binary_path.display(),
        detection.version.as_deref().unwrap_or("unknown version")
    );
    Ok(detection)
}
