//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Editor)
//! but are themselves concrete structs, not traits.

mod zettel;

pub use zettel::{IdentifierInfo, ZettelService};
