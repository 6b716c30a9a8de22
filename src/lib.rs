//! swatchmatch library
//!
//! Color math, palette derivation, contrast-aware role assignment and
//! matching of stock images from several providers against a set of colors.

// Module declarations
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod matching;
pub mod palette;
pub mod providers;
pub mod roles;

#[cfg(feature = "web")]
pub mod web;
