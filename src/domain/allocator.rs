//! Allocation of the next free child identifier.
//!
//! The existence predicate is probed without any locking. Callers that create
//! notes concurrently must hold a lock around "allocate, then write".

use tracing::trace;

use crate::domain::identifier::Identifier;

/// Deepen `parent` once, then increment until `exists` reports a free identifier.
///
/// Every increment yields a string not produced earlier in the same run, so the
/// loop ends as long as `exists` answers from a finite namespace.
pub fn next_child<F>(parent: &Identifier, mut exists: F) -> Identifier
where
    F: FnMut(&Identifier) -> bool,
{
    let mut candidate = parent.clone();
    candidate.deepen();
    while exists(&candidate) {
        trace!(candidate = %candidate, "taken");
        candidate.increment();
    }
    trace!(candidate = %candidate, "free");
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn taken(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_existing_first_child_when_next_child_then_second_child() {
        let existing = taken(&["a", "a1"]);
        let parent = Identifier::parse("a").unwrap();
        let child = next_child(&parent, |id| existing.contains(&id.to_string()));
        assert_eq!(child.to_string(), "a2");
    }

    #[test]
    fn given_no_children_when_next_child_then_first_child() {
        let parent = Identifier::parse("a1").unwrap();
        let child = next_child(&parent, |_| false);
        assert_eq!(child.to_string(), "a1a");
    }

    #[test]
    fn given_root_when_next_child_then_next_top_level() {
        let existing = taken(&["a", "b"]);
        let child = next_child(&Identifier::root(), |id| existing.contains(&id.to_string()));
        assert_eq!(child.to_string(), "c");
    }

    #[test]
    fn given_nine_children_when_next_child_then_overflows_to_double_zero() {
        let existing = taken(&["a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8", "a9"]);
        let parent = Identifier::parse("a").unwrap();
        let child = next_child(&parent, |id| existing.contains(&id.to_string()));
        assert_eq!(child.to_string(), "a00");
    }

    #[test]
    fn given_many_taken_when_next_child_then_never_repeats_candidate() {
        let mut seen = HashSet::new();
        let parent = Identifier::parse("b").unwrap();
        let child = next_child(&parent, |id| {
            assert!(seen.insert(id.to_string()), "candidate repeated: {id}");
            seen.len() <= 150
        });
        assert_eq!(seen.len(), 151);
        assert!(seen.contains(&child.to_string()));
    }
}
