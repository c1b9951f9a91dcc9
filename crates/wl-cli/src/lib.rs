//! Sitter workload CLI library.
//!
//! This crate provides the `wl` command-line interface over `wl-core`.

mod cli;
pub mod commands;
mod config;
pub mod source;

pub use cli::{Cli, Commands};
pub use config::Config;
