//! Completion listing.
//!
//! Tries each candidate in order and keeps the first successful output.
//! Failures are never surfaced: the listing is informational only.

use std::path::Path;

use modinit_config::ListingCommand;
use tracing::debug;

use crate::command::{CommandRunner, CommandSpec};

/// Output of the listing command that succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub command: String,
    pub output: String,
}

/// Run the listing chain in `cwd`. Returns `None` when every candidate fails.
pub fn list_directory<R: CommandRunner + ?Sized>(
    runner: &R,
    candidates: &[ListingCommand],
    cwd: &Path,
) -> Option<Listing> {
    for candidate in candidates {
        let spec = CommandSpec::new(&candidate.program).args(&candidate.args);

        match runner.run(&spec, cwd) {
            Ok(output) if output.success => {
                return Some(Listing {
                    command: spec.to_string(),
                    output: output.stdout,
                });
            }
            Ok(output) => {
                debug!(command = %spec, exit_code = ?output.exit_code, "listing command failed");
            }
            Err(e) => {
                debug!(command = %spec, error = %e, "listing command unavailable");
            }
        }
    }

    debug!("no listing command succeeded");
    None
}
