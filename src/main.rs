//! modinit - scaffold a new Go module.
//!
//! ## Usage
//!
//! ```bash
//! # Initialize a module in the current directory
//! modinit github.com/you/myapp
//!
//! # With verbose logging
//! modinit -v myapp
//!
//! # Keep existing files, tolerate a failing `go mod tidy`
//! modinit --no-overwrite --keep-going-on-tidy myapp
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use modinit_config::{InitConfig, TidyFailurePolicy, load_config};
use modinit_core::{InitError, LogGuard, init_logging};
use modinit_scaffold::{
    CommandRunner, InitReport, InitRequest, Initializer, Platform, SystemRunner,
    generate_guidance,
};
use tracing::{error, info, warn};

/// Scaffold a new Go module
///
/// Runs `go mod init`, creates the standard directory layout, writes
/// main.go, .gitignore, Makefile and README.md, then runs `go mod tidy`.
#[derive(Parser, Debug)]
#[command(name = "modinit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Module name passed to `go mod init` (used verbatim)
    #[arg(allow_hyphen_values = true)]
    module_name: Option<String>,

    /// Further positional arguments are accepted and ignored
    #[arg(hide = true)]
    extra: Vec<String>,

    /// Enable verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Also write JSON logs to this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Config file (defaults to <config dir>/modinit/config.yaml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail instead of replacing existing generated files
    #[arg(long)]
    no_overwrite: bool,

    /// Warn and exit successfully when `go mod tidy` fails
    #[arg(long)]
    keep_going_on_tidy: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            return fail(&InitError::InvalidArguments {
                message: e.to_string(),
            });
        }
    };

    // Usage check comes first: no logging setup, no filesystem access
    let Some(module_name) = cli.module_name.clone() else {
        return fail(&InitError::MissingModuleName);
    };

    let _guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            println!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    if !cli.extra.is_empty() {
        warn!(ignored = ?cli.extra, "ignoring extra arguments");
    }

    let config = match effective_config(&cli) {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };

    match run(&config, module_name) {
        Ok(report) => {
            print_report(&report);
            info!(module = %report.module_name, "module initialized");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

/// Set up logging based on CLI arguments.
fn setup_logging(cli: &Cli) -> modinit_core::Result<LogGuard> {
    init_logging(cli.log_dir.clone(), cli.verbose)
}

/// Load the config file and apply CLI overrides.
fn effective_config(cli: &Cli) -> modinit_core::Result<InitConfig> {
    let mut config = load_config(cli.config.as_deref())?;
    if cli.no_overwrite {
        config = config.with_overwrite_existing(false);
    }
    if cli.keep_going_on_tidy {
        config = config.with_tidy_failure(TidyFailurePolicy::Warn);
    }
    Ok(config)
}

/// Run the initializer in the current directory.
fn run(config: &InitConfig, module_name: String) -> modinit_core::Result<InitReport> {
    let request = InitRequest::in_current_dir(module_name)?;
    Initializer::new(config.clone()).initialize(&request)
}

fn print_report(report: &InitReport) {
    if let Some(warning) = report.tidy_warning() {
        println!("{warning}");
    }

    println!("{}", report.success_message());
    println!("\nProject structure:");
    if let Some(listing) = &report.listing {
        print!("{}", listing.output);
    }
}

/// Print the error (and any guidance) and pick the exit code.
fn fail(err: &InitError) -> ExitCode {
    if err.is_usage_error() {
        println!("{err}");
        return ExitCode::from(err.exit_code());
    }

    error!(error = ?err, "initialization failed");
    println!("Error: {err}");

    if let InitError::ToolchainNotFound { name, .. } | InitError::ToolchainUnusable { name, .. } =
        err
    {
        let searched = SystemRunner.search_path();
        print!("{}", generate_guidance(name, Platform::detect(), &searched));
    } else if let Some(hint) = err.guidance() {
        println!("Hint: {hint}");
    }

    if err.leaves_partial_project() {
        println!("The project directory may be partially initialized.");
    }

    ExitCode::from(err.exit_code())
}
