//! Command-line surface of the exdriver launcher.
//!
//! `exdriver <name> [args...]` runs the named example with the remaining
//! arguments. Nothing after the name is interpreted by the launcher.

mod commands;

pub use commands::{Cli, run_cli};
