//! Connector states for drawing the note tree as text.
//!
//! Every flattened entry carries one [`ConnectorState`] per depth column,
//! outermost first. Mapping states to glyphs happens only in
//! [`ConnectorState::glyph`], so rendering needs no recursion.

use std::collections::VecDeque;
use std::fmt;

use itertools::Itertools;

use crate::domain::arena::PrefixTree;

/// Position of an entry within one depth column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorState {
    /// Only entry of its group
    Single,
    /// First entry of a group with more to follow
    First,
    /// Neither first nor last; the vertical line passes through
    Pass,
    /// Starts a sub-branch that has later siblings
    Fork,
    /// Last entry of its group
    Last,
    /// All branches in this column already ended; nothing to draw
    None,
}

impl ConnectorState {
    pub fn glyph(self) -> char {
        match self {
            ConnectorState::Single => '─',
            ConnectorState::First => '┬',
            ConnectorState::Pass => '│',
            ConnectorState::Fork => '├',
            ConnectorState::Last => '└',
            ConnectorState::None => ' ',
        }
    }
}

impl fmt::Display for ConnectorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A payload together with its per-column connector states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNode<P> {
    pub payload: P,
    pub states: Vec<ConnectorState>,
}

impl<P> RenderedNode<P> {
    /// Glyphs for all columns, e.g. `├┬`.
    pub fn glyphs(&self) -> String {
        self.states.iter().map(|s| s.glyph()).join("")
    }

    /// Glyphs followed by a single separating space.
    pub fn indent_marker(&self) -> String {
        format!("{} ", self.glyphs())
    }
}

/// Entry under construction; states are prepended as recursion unwinds.
#[derive(Debug)]
pub(crate) struct Pending<P> {
    payload: P,
    states: VecDeque<ConnectorState>,
}

impl<P> Pending<P> {
    pub(crate) fn new(payload: P) -> Self {
        Self {
            payload,
            states: VecDeque::new(),
        }
    }

    /// An entry whose outermost state so far is `First` or `Single` heads a
    /// sub-branch of the column being marked.
    fn starts_branch(&self) -> bool {
        matches!(
            self.states.front(),
            Some(ConnectorState::First | ConnectorState::Single)
        )
    }
}

impl<P> From<Pending<P>> for RenderedNode<P> {
    fn from(pending: Pending<P>) -> Self {
        Self {
            payload: pending.payload,
            states: pending.states.into(),
        }
    }
}

/// Prepend one state to every entry of a node's flattened subtree.
pub(crate) fn mark_column<P>(entries: &mut [Pending<P>]) {
    let num_branches = entries.iter().filter(|e| e.starts_branch()).count();
    let len = entries.len();
    let mut branches_seen = 0;

    for (i, entry) in entries.iter_mut().enumerate() {
        let state = if num_branches > 0 && branches_seen == num_branches {
            ConnectorState::None
        } else if num_branches > 0 && entry.starts_branch() {
            branches_seen += 1;
            if branches_seen == num_branches {
                ConnectorState::Last
            } else {
                ConnectorState::Fork
            }
        } else if len == 1 {
            ConnectorState::Single
        } else if i == 0 {
            ConnectorState::First
        } else if i == len - 1 {
            ConnectorState::Last
        } else {
            ConnectorState::Pass
        };
        entry.states.push_front(state);
    }
}

/// Build the prefix tree for `entries` and flatten it for display.
pub fn render<I, S, P>(entries: I) -> Vec<RenderedNode<P>>
where
    I: IntoIterator<Item = (S, P)>,
    S: AsRef<str>,
{
    PrefixTree::from_entries(entries).flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConnectorState::*;

    fn marked(entries: Vec<Pending<&'static str>>) -> Vec<Vec<ConnectorState>> {
        let mut entries = entries;
        mark_column(&mut entries);
        entries
            .into_iter()
            .map(|e| RenderedNode::from(e).states)
            .collect()
    }

    #[test]
    fn given_one_entry_when_marking_then_single() {
        assert_eq!(marked(vec![Pending::new("a")]), vec![vec![Single]]);
    }

    #[test]
    fn given_three_plain_entries_when_marking_then_first_pass_last() {
        let states = marked(vec![Pending::new("a"), Pending::new("b"), Pending::new("c")]);
        assert_eq!(states, vec![vec![First], vec![Pass], vec![Last]]);
    }

    #[test]
    fn given_branch_heads_when_marking_then_fork_then_last() {
        let mut head = Pending::new("x");
        head.states.push_front(Single);
        let mut second = Pending::new("y");
        second.states.push_front(First);
        let mut tail = Pending::new("z");
        tail.states.push_front(Last);

        let states = marked(vec![head, second, tail]);
        assert_eq!(
            states,
            vec![vec![Fork, Single], vec![Last, First], vec![None, Last]]
        );
    }

    #[test]
    fn given_states_when_glyphs_then_box_drawing() {
        let node = RenderedNode {
            payload: (),
            states: vec![Fork, First, Pass, Last, Single, None],
        };
        assert_eq!(node.glyphs(), "├┬│└─ ");
        assert_eq!(node.indent_marker(), "├┬│└─  ");
    }
}
