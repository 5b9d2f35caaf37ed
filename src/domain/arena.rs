use std::collections::BTreeMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::identifier::split_segments;
use crate::domain::render::{mark_column, Pending, RenderedNode};

/// Node of the prefix tree.
#[derive(Debug)]
pub struct PrefixNode<P> {
    /// Present only if some identifier ends exactly at this node
    pub payload: Option<P>,
    /// Children keyed by path segment, kept in sorted key order
    pub children: BTreeMap<String, Index>,
}

impl<P> PrefixNode<P> {
    fn empty() -> Self {
        Self {
            payload: None,
            children: BTreeMap::new(),
        }
    }
}

/// Arena-based prefix tree over identifier path segments.
///
/// Nodes without a payload are implied ancestors: `a1b` alone creates the
/// nodes `a` and `a/1` without payloads. Nodes are never removed, so every
/// index handed out stays valid for the lifetime of the tree.
#[derive(Debug)]
pub struct PrefixTree<P> {
    arena: Arena<PrefixNode<P>>,
    root: Index,
}

impl<P> Default for PrefixTree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> PrefixTree<P> {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(PrefixNode::empty());
        Self { arena, root }
    }

    /// Build a tree from `(identifier, payload)` pairs. Insertion order does not matter.
    ///
    /// Identifiers are split leniently, so any string yields a path.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, P)>,
        S: AsRef<str>,
    {
        let mut tree = Self::new();
        for (id, payload) in entries {
            tree.insert(split_segments(id.as_ref()), payload);
        }
        tree
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&PrefixNode<P>> {
        self.arena.get(idx)
    }

    /// Attach `payload` at `path`, creating intermediate nodes on demand.
    ///
    /// An existing payload at the same path is replaced.
    pub fn insert<I, S>(&mut self, path: I, payload: P) -> Index
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut current = self.root;
        for segment in path {
            let segment = segment.into();
            let existing = self.arena[current].children.get(&segment).copied();
            current = match existing {
                Some(child) => child,
                None => {
                    let child = self.arena.insert(PrefixNode::empty());
                    self.arena[current].children.insert(segment, child);
                    child
                }
            };
        }
        self.arena[current].payload = Some(payload);
        current
    }

    /// Look up the node at `path`, if it exists.
    pub fn find<I, S>(&self, path: I) -> Option<Index>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        path.into_iter().try_fold(self.root, |current, segment| {
            self.get_node(current)?
                .children
                .get(segment.as_ref())
                .copied()
        })
    }

    /// Number of payload-bearing nodes.
    pub fn len(&self) -> usize {
        self.arena
            .iter()
            .filter(|(_, node)| node.payload.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten the tree in pre-order with sorted siblings, annotating every
    /// entry with one connector state per depth column.
    #[instrument(level = "debug", skip(self))]
    pub fn flatten(mut self) -> Vec<RenderedNode<P>> {
        let root = self.root;
        self.flatten_node(root)
            .into_iter()
            .map(RenderedNode::from)
            .collect()
    }

    fn flatten_node(&mut self, idx: Index) -> Vec<Pending<P>> {
        let (payload, children) = match self.arena.get_mut(idx) {
            Some(node) => (
                node.payload.take(),
                node.children.values().copied().collect::<Vec<_>>(),
            ),
            None => return Vec::new(),
        };

        let mut entries: Vec<Pending<P>> = payload.into_iter().map(Pending::new).collect();
        for child in children {
            entries.extend(self.flatten_node(child));
        }
        mark_column(&mut entries);
        entries
    }
}
