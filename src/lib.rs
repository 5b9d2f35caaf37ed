//! Luhmann-style Zettelkasten addressing.
//!
//! Note identifiers alternate letter runs and digit runs (`a1b2c`), one
//! nesting level per switch. [`domain`] holds the identifier arithmetic and
//! the tree renderer; the remaining layers bind them to a directory of note
//! files and a command line.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
