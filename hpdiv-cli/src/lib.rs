//! Support library for the `hpdiv` binary.
//!
//! Exposes the command pipeline and logging setup so tests can drive
//! commands without spawning a process.

pub mod cli;
pub mod logging;
