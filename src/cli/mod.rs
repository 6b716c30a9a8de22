//! CLI command handlers for swatchmatch.
//!
//! Every command prints human-readable text by default and JSON with `--json`.

pub mod common;
pub mod config;
pub mod palette;
pub mod roles;
pub mod search;

// Re-export types used by main.rs
pub use common::ExitCode;
pub use config::ConfigArgs;
pub use palette::{HarmonyArgs, PaletteArgs};
pub use roles::RolesArgs;
pub use search::MatchArgs;
