//! Go module scaffolding.
//!
//! This crate provides the initialization pipeline: toolchain detection,
//! `go mod init`, directory and file generation, `go mod tidy`, and the
//! completion listing.

pub mod command;
pub mod detection;
pub mod generator;
pub mod guidance;
pub mod initializer;
pub mod listing;
pub mod templates;

pub use command::{CommandOutput, CommandRunner, CommandSpec, SystemRunner};
pub use detection::ToolchainDetection;
pub use guidance::{Platform, generate_guidance};
pub use initializer::{InitReport, InitRequest, Initializer, Stage, TidyOutcome};
pub use templates::TemplateRenderer;
