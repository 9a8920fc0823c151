#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared building blocks for the aotgen workspace.
//!
//! - [`Colors`]: ANSI palette used by CLI dumps
//! - [`utils`]: identifier and literal helpers for emitting C#

mod colors;
pub mod utils;


pub use colors::Colors;
