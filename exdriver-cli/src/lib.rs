//! Support library for the exdriver CLI binary.
//!
//! Exposes the argument surface, the bundled catalog, the program launcher,
//! and logging setup so tests can exercise dispatch without spawning the
//! binary.

pub mod catalog;
pub mod cli;
pub mod launcher;
pub mod logging;
