//! CLI subcommand implementations.

pub mod classify;
pub mod compare;
pub mod day;
pub mod period;
pub mod util;
pub mod week;
