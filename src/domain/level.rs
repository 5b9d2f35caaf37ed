//! One nesting level of an identifier: a letter run followed by an optional digit run.

use std::fmt;

/// A single level of a note identifier, e.g. `ab12` in `ab12c`.
///
/// A level with a non-empty digit run is "numbered" and spans two tree
/// segments; a bare letter run is "lettered" and spans one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Level {
    letters: Vec<char>,
    digits: Vec<char>,
}

impl Level {
    pub fn new(letters: &str, digits: &str) -> Self {
        Self {
            letters: letters.chars().collect(),
            digits: digits.chars().collect(),
        }
    }

    pub fn letters(&self) -> String {
        self.letters.iter().collect()
    }

    pub fn digits(&self) -> String {
        self.digits.iter().collect()
    }

    pub fn has_digits(&self) -> bool {
        !self.digits.is_empty()
    }

    pub(crate) fn push_letter(&mut self, c: char) {
        self.letters.push(c);
    }

    pub(crate) fn push_digit(&mut self, c: char) {
        self.digits.push(c);
    }

    pub(crate) fn set_digits(&mut self, digits: &str) {
        self.digits = digits.chars().collect();
    }

    /// Depth units this level contributes: 2 when numbered, 1 when lettered.
    pub fn depth(&self) -> usize {
        if self.has_digits() {
            2
        } else {
            1
        }
    }

    /// Tree path segments of this level: the letter run, then the digit run if any.
    pub fn segments(&self) -> Vec<String> {
        if self.has_digits() {
            vec![self.letters(), self.digits()]
        } else {
            vec![self.letters()]
        }
    }

    /// Advance to the next value of the active run (digits if present, else letters).
    ///
    /// Carries right to left. When every character rolls over the run grows by
    /// one reset character, so `9` becomes `00` and `z` becomes `aa`.
    pub fn increment(&mut self) {
        if self.has_digits() {
            carry(&mut self.digits, '0', '9');
        } else {
            carry(&mut self.letters, 'a', 'z');
        }
    }
}

fn carry(run: &mut Vec<char>, reset: char, last: char) {
    for c in run.iter_mut().rev() {
        if *c != last {
            *c = successor(*c);
            return;
        }
        *c = reset;
    }
    // full overflow
    run.push(reset);
}

fn successor(c: char) -> char {
    char::from_u32(c as u32 + 1).unwrap_or(c)
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letters(), self.digits())
    }
}
