//! The project initialization pipeline.
//!
//! Stages run strictly in order:
//!
//! ```text
//! ToolchainCheck -> ModuleInit -> DirCreate -> FileGen -> DepsTidy -> Report
//! ```
//!
//! Any error ends the run immediately. Nothing is rolled back: a failure in
//! `DepsTidy` (under [`TidyFailurePolicy::Abort`]) leaves the generated files
//! on disk.

use std::fmt;
use std::path::PathBuf;

use modinit_config::{InitConfig, TidyFailurePolicy};
use modinit_core::{InitError, Result};
use tracing::{info, warn};

use crate::command::{CommandRunner, SystemRunner, run_checked};
use crate::detection::{ToolchainDetection, detect_toolchain};
use crate::generator::{
    DirectoryEntry, WrittenFile, create_directory_structure, ensure_writable, write_project_files,
};
use crate::listing::{Listing, list_directory};

/// Pipeline stage, used for log context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ToolchainCheck,
    ModuleInit,
    DirCreate,
    FileGen,
    DepsTidy,
    Report,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ToolchainCheck => "toolchain-check",
            Stage::ModuleInit => "module-init",
            Stage::DirCreate => "dir-create",
            Stage::FileGen => "file-gen",
            Stage::DepsTidy => "deps-tidy",
            Stage::Report => "report",
        };
        f.write_str(name)
    }
}

/// What to initialize and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitRequest {
    /// Module name, used verbatim
    pub module_name: String,
    /// Project root; commands run here and paths are relative to it
    pub root: PathBuf,
}

impl InitRequest {
    pub fn new(module_name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            module_name: module_name.into(),
            root: root.into(),
        }
    }

    /// Request rooted at the process working directory.
    pub fn in_current_dir(module_name: impl Into<String>) -> Result<Self> {
        let root = std::env::current_dir()
            .map_err(|e| InitError::internal(format!("cannot read current directory: {e}")))?;
        Ok(Self::new(module_name, root))
    }
}

/// Result of the tidy pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TidyOutcome {
    Succeeded,
    /// Failed but tolerated by [`TidyFailurePolicy::Warn`]
    Failed { stderr: String },
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct InitReport {
    pub module_name: String,
    pub toolchain: ToolchainDetection,
    pub directories: Vec<DirectoryEntry>,
    pub files: Vec<WrittenFile>,
    pub tidy: TidyOutcome,
    /// `None` when no listing command succeeded
    pub listing: Option<Listing>,
}

impl InitReport {
    /// Success line shown to the user.
    pub fn success_message(&self) -> String {
        format!("✅ Initialized Go module: {}", self.module_name)
    }

    /// Warning shown when a failed tidy pass was tolerated.
    pub fn tidy_warning(&self) -> Option<String> {
        match &self.tidy {
            TidyOutcome::Succeeded => None,
            TidyOutcome::Failed { stderr } => Some(format!(
                "⚠️  {} mod tidy failed: {}",
                self.toolchain.name,
                stderr.trim()
            )),
        }
    }
}

/// Drives the pipeline with a configurable command runner.
pub struct Initializer<R: CommandRunner = SystemRunner> {
    config: InitConfig,
    runner: R,
}

impl Initializer<SystemRunner> {
    /// Initializer that runs real processes.
    pub fn new(config: InitConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: CommandRunner> Initializer<R> {
    pub fn with_runner(config: InitConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &InitConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run the whole pipeline for `request`.
    pub fn initialize(&self, request: &InitRequest) -> Result<InitReport> {
        let root = request.root.as_path();
        let name = request.module_name.as_str();
        info!(module = name, root = %root.display(), "initializing module");

        info!(stage = %Stage::ToolchainCheck, toolchain = %self.config.toolchain, "checking toolchain");
        let toolchain = detect_toolchain(&self.runner, &self.config.toolchain, root)?;
        ensure_writable(root, self.config.overwrite_existing)?;

        info!(stage = %Stage::ModuleInit, "running mod init");
        run_checked(&self.runner, &toolchain.command(["mod", "init", name]), root)?;

        info!(stage = %Stage::DirCreate, "creating directories");
        let directories = create_directory_structure(root)?;

        info!(stage = %Stage::FileGen, "writing project files");
        let files = write_project_files(root, name, self.config.overwrite_existing)?;

        info!(stage = %Stage::DepsTidy, "running mod tidy");
        let tidy = self.tidy(&toolchain, request)?;

        info!(stage = %Stage::Report, "listing project");
        let listing = list_directory(&self.runner, &self.config.listing, root);

        Ok(InitReport {
            module_name: request.module_name.clone(),
            toolchain,
            directories,
            files,
            tidy,
            listing,
        })
    }

    fn tidy(&self, toolchain: &ToolchainDetection, request: &InitRequest) -> Result<TidyOutcome> {
        match run_checked(&self.runner, &toolchain.command(["mod", "tidy"]), &request.root) {
            Ok(_) => Ok(TidyOutcome::Succeeded),
            Err(InitError::CommandFailed { stderr, .. })
                if self.config.tidy_failure == TidyFailurePolicy::Warn =>
            {
                warn!(stderr = %stderr.trim(), "mod tidy failed, continuing");
                Ok(TidyOutcome::Failed { stderr })
            }
            Err(e) => Err(e),
        }
    }
}
