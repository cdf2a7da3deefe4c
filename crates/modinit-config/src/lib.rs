//! Configuration for modinit.
//!
//! The generated content never depends on configuration; these settings only
//! choose policy: which toolchain binary to drive, whether existing files may
//! be replaced, what a failed tidy pass means, and how the final listing is
//! produced.
//!
//! Configuration is read from `--config <path>` when given, otherwise from
//! `<config dir>/modinit/config.yaml` when that file exists, otherwise the
//! defaults apply.

use std::path::{Path, PathBuf};

use modinit_core::{InitError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What to do when the dependency tidy pass fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TidyFailurePolicy {
    /// Stop the run and exit nonzero, leaving written files in place.
    #[default]
    Abort,
    /// Log a warning and finish the run successfully.
    Warn,
}

/// One candidate command in the completion listing chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCommand {
    /// Program resolved via PATH
    pub program: String,

    /// Arguments passed verbatim
    #[serde(default)]
    pub args: Vec<String>,
}

impl ListingCommand {
    /// Create a listing command.
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

/// Top-level modinit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitConfig {
    /// Toolchain binary name or path (e.g., "go", "/usr/local/go/bin/go")
    pub toolchain: String,

    /// Replace generated files that already exist
    pub overwrite_existing: bool,

    /// Behaviour when `go mod tidy` fails
    pub tidy_failure: TidyFailurePolicy,

    /// Ordered listing candidates; the first that succeeds is shown
    pub listing: Vec<ListingCommand>,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            toolchain: "go".to_string(),
            overwrite_existing: true,
            tidy_failure: TidyFailurePolicy::Abort,
            listing: vec![
                ListingCommand::new("tree", &["-L", "1", "-a"]),
                ListingCommand::new("ls", &["-la"]),
            ],
        }
    }
}

impl InitConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| InitError::config_not_found_with_source(path, e))?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| InitError::ConfigInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.toolchain.trim().is_empty() {
            return Err(InitError::ConfigValidation {
                message: "toolchain must not be empty".to_string(),
            });
        }
        if let Some(pos) = self.listing.iter().position(|c| c.program.trim().is_empty()) {
            return Err(InitError::ConfigValidation {
                message: format!("listing entry {pos} has an empty program"),
            });
        }
        Ok(())
    }

    /// Set the overwrite policy.
    pub fn with_overwrite_existing(mut self, overwrite: bool) -> Self {
        self.overwrite_existing = overwrite;
        self
    }

    /// Set the tidy failure policy.
    pub fn with_tidy_failure(mut self, policy: TidyFailurePolicy) -> Self {
        self.tidy_failure = policy;
        self
    }

    /// Set the toolchain binary.
    pub fn with_toolchain(mut self, toolchain: impl Into<String>) -> Self {
        self.toolchain = toolchain.into();
        self
    }

    /// Replace the listing chain.
    pub fn with_listing(mut self, listing: Vec<ListingCommand>) -> Self {
        self.listing = listing;
        self
    }
}

/// Default config file location: `<config dir>/modinit/config.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("modinit").join("config.yaml"))
}

/// Load the effective configuration.
///
/// An explicit path must exist. The default path is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<InitConfig> {
    load_config_from(explicit, default_config_path().as_deref())
}

/// Load configuration with an explicit fallback location.
pub fn load_config_from(explicit: Option<&Path>, fallback: Option<&Path>) -> Result<InitConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(InitError::config_not_found(path));
        }
        return InitConfig::from_yaml(path);
    }

    match fallback {
        Some(path) if path.exists() => InitConfig::from_yaml(path),
        _ => {
            debug!("no config file found, using defaults");
            Ok(InitConfig::default())
        }
    }
}
