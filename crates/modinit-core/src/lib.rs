//! # modinit-core
//!
//! Core types shared by the modinit crates.
//!
//! This crate provides:
//! - [`InitError`] - Error type for every modinit operation
//! - [`logging`] - Tracing setup
//!
//! ## Example
//!
//! ```no_run
//! use modinit_core::{InitError, logging};
//!
//! fn main() -> modinit_core::Result<()> {
//!     let _guard = logging::init_logging(None, 0)?;
//!
//!     let module_name = std::env::args().nth(1);
//!     if module_name.is_none() {
//!         return Err(InitError::MissingModuleName);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export main types for convenience
pub use error::{InitError, Result, USAGE};
pub use logging::{LogGuard, init_logging};
