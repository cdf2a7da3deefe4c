//! Error types for modinit operations.
//!
//! Every failure is fatal for the current run: there is no retry and no
//! rollback. Errors carry enough context (paths, command lines, captured
//! stderr) for the binary to print an actionable message and exit nonzero.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`InitError`].
pub type Result<T> = std::result::Result<T, InitError>;

/// Usage line printed for every command-line error.
pub const USAGE: &str = "Usage: modinit <module-name>";

/// Error type for all modinit operations.
#[derive(Debug, Error)]
pub enum InitError {
    // =========================================================================
    // Usage Errors
    // =========================================================================
    /// No module name was supplied on the command line
    #[error("{}", USAGE)]
    MissingModuleName,

    /// The command line could not be parsed
    #[error("{}", USAGE)]
    InvalidArguments { message: String },

    // =========================================================================
    // Toolchain Errors
    // =========================================================================
    /// Toolchain binary could not be located on the search path
    #[error("{name} is not installed or not in PATH")]
    ToolchainNotFound { name: String, message: String },

    /// Toolchain binary was found but the version query failed
    #[error("{name} is not installed or not in PATH ({name} version failed: {})", .stderr.trim())]
    ToolchainUnusable {
        name: String,
        binary_path: PathBuf,
        stderr: String,
    },

    // =========================================================================
    // External Command Errors
    // =========================================================================
    /// Command could not be started at all
    #[error("Failed to run `{command}`")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Command ran and exited with a nonzero status
    #[error("{}", .stderr.trim())]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    // =========================================================================
    // File System Errors
    // =========================================================================
    /// Directory creation failed
    #[error("Failed to create directory: {path}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write failed
    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File already exists and overwriting is disabled
    #[error("Refusing to overwrite existing file: {path}")]
    FileExists { path: PathBuf },

    // =========================================================================
    // Template Errors
    // =========================================================================
    /// A project template could not be registered or rendered
    #[error("Failed to render template {template}: {message}")]
    TemplateRender { template: String, message: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration file not found
    #[error("Configuration not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file is invalid YAML
    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String },

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Internal error (bug in modinit)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl InitError {
    // =========================================================================
    // Constructor helpers for common error patterns
    // =========================================================================

    /// Create a ToolchainNotFound error
    pub fn toolchain_not_found(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolchainNotFound {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a CommandSpawn error
    pub fn command_spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandSpawn {
            command: command.into(),
            source,
        }
    }

    /// Create a CommandFailed error
    pub fn command_failed(
        command: impl Into<String>,
        exit_code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Create a TemplateRender error
    pub fn template_render(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TemplateRender {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Create a DirectoryCreation error
    pub fn directory_creation(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreation {
            path: path.into(),
            source,
        }
    }

    /// Create a FileWrite error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a ConfigNotFound error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound {
            path: path.into(),
            source: None,
        }
    }

    /// Create a ConfigNotFound error with source
    pub fn config_not_found_with_source(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigNotFound {
            path: path.into(),
            source: Some(source),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    // =========================================================================
    // Error classification helpers
    // =========================================================================

    /// Returns true if the toolchain is missing or unusable
    pub fn is_toolchain_error(&self) -> bool {
        matches!(
            self,
            Self::ToolchainNotFound { .. } | Self::ToolchainUnusable { .. }
        )
    }

    /// Returns true if the command line itself was wrong
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::MissingModuleName | Self::InvalidArguments { .. })
    }

    /// Returns true if the project directory may hold a partial layout
    pub fn leaves_partial_project(&self) -> bool {
        matches!(
            self,
            Self::DirectoryCreation { .. } | Self::FileWrite { .. }
        )
    }

    /// Process exit status for this error.
    ///
    /// Every failure kind maps to the same status.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Returns actionable guidance for the user
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            Self::ToolchainNotFound { .. } | Self::ToolchainUnusable { .. } => {
                Some("Install Go from https://go.dev/dl/ and make sure 'go' is on your PATH")
            }
            Self::FileExists { .. } => {
                Some("Remove the file or run without --no-overwrite to replace it")
            }
            Self::ConfigInvalid { .. } => Some("Check YAML syntax in the modinit config file"),
            Self::ConfigNotFound { .. } => Some("Check the path passed to --config"),
            _ => None,
        }
    }
}
