//! Hierarchical note identifiers such as `a1b2c`.
//!
//! Each switch between a letter run and a digit run is one nesting step.
//! Siblings are ordered by incrementing the innermost run (see [`Level::increment`]).

use std::fmt;
use std::str::FromStr;

use tracing::instrument;

use crate::domain::allocator;
use crate::domain::error::DomainError;
use crate::domain::level::Level;

/// A parsed note identifier: its levels, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Identifier {
    levels: Vec<Level>,
}

impl Identifier {
    /// The empty identifier; deepening it yields the first top-level note `a`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse an identifier, rejecting anything outside `[a-z0-9]`.
    ///
    /// A digit run must be preceded by a letter run: `1a` is malformed.
    /// The empty string parses to [`Identifier::root`].
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        if let Some((pos, c)) = input
            .char_indices()
            .find(|(_, c)| !c.is_ascii_lowercase() && !c.is_ascii_digit())
        {
            return Err(DomainError::MalformedIdentifier {
                input: input.to_string(),
                reason: format!("unexpected character '{c}' at position {pos}"),
            });
        }
        if input.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(DomainError::MalformedIdentifier {
                input: input.to_string(),
                reason: "digits must follow a letter run".to_string(),
            });
        }
        Ok(Self {
            levels: tokenize(input),
        })
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn is_root(&self) -> bool {
        self.levels.is_empty()
    }

    /// Nesting depth: numbered levels count 2, lettered levels count 1.
    pub fn depth(&self) -> usize {
        self.levels.iter().map(Level::depth).sum()
    }

    /// Prefix-tree path of this identifier, e.g. `a1b` -> `["a", "1", "b"]`.
    pub fn segments(&self) -> Vec<String> {
        self.levels.iter().flat_map(Level::segments).collect()
    }

    /// Move one step down: number a lettered level, or open a new lettered level.
    pub fn deepen(&mut self) {
        match self.levels.last_mut() {
            Some(last) if !last.has_digits() => last.set_digits("1"),
            _ => self.levels.push(Level::new("a", "")),
        }
    }

    /// Advance the innermost level to its next sibling value. No-op on the root.
    pub fn increment(&mut self) {
        if let Some(last) = self.levels.last_mut() {
            last.increment();
        }
    }

    /// First child identifier for which `exists` returns false.
    #[instrument(level = "debug", skip(self, exists), fields(parent = %self))]
    pub fn next_child<F>(&self, exists: F) -> Identifier
    where
        F: FnMut(&Identifier) -> bool,
    {
        allocator::next_child(self, exists)
    }
}

/// Split any string into path segments without failing.
///
/// Used when building the note tree from arbitrary file names: characters
/// that are not ASCII digits are treated as letters, and a leading digit run
/// gets an empty letter segment.
pub fn split_segments(input: &str) -> Vec<String> {
    tokenize(input).iter().flat_map(Level::segments).collect()
}

fn tokenize(input: &str) -> Vec<Level> {
    let mut levels: Vec<Level> = Vec::new();
    for c in input.chars() {
        if c.is_ascii_digit() {
            match levels.last_mut() {
                Some(level) => level.push_digit(c),
                None => {
                    let mut level = Level::default();
                    level.push_digit(c);
                    levels.push(level);
                }
            }
        } else {
            match levels.last_mut() {
                Some(level) if !level.has_digits() => level.push_letter(c),
                _ => {
                    let mut level = Level::default();
                    level.push_letter(c);
                    levels.push(level);
                }
            }
        }
    }
    levels
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in &self.levels {
            write!(f, "{level}")?;
        }
        Ok(())
    }
}

impl FromStr for Identifier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
