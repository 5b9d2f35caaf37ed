//! Domain layer: identifier arithmetic, the note prefix tree and its rendering
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod allocator;
pub mod arena;
pub mod entities;
pub mod error;
pub mod identifier;
pub mod level;
pub mod render;

pub use arena::{PrefixNode, PrefixTree};
pub use entities::*;
pub use error::DomainError;
pub use identifier::{split_segments, Identifier};
pub use level::Level;
pub use render::{render, ConnectorState, RenderedNode};
