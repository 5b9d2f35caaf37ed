//! Tests for flattening identifiers into a drawable tree

use zettl::domain::{render, ConnectorState, PrefixTree, RenderedNode};
use ConnectorState::*;

fn rendered(ids: &[&'static str]) -> Vec<RenderedNode<&'static str>> {
    render(ids.iter().map(|id| (*id, *id)))
}

fn order(nodes: &[RenderedNode<&'static str>]) -> Vec<&'static str> {
    nodes.iter().map(|n| n.payload).collect()
}

// ============================================================
// ordering
// ============================================================

#[test]
fn given_unsorted_ids_when_render_then_preorder_with_sorted_siblings() {
    let nodes = rendered(&["b", "a", "a1"]);
    assert_eq!(order(&nodes), vec!["a", "a1", "b"]);
}

#[test]
fn given_multi_digit_sibling_when_render_then_sorted_lexicographically() {
    let nodes = rendered(&["a", "a9", "a10"]);
    assert_eq!(order(&nodes), vec!["a", "a10", "a9"]);
}

#[test]
fn given_only_deep_id_when_render_then_implied_ancestors_not_listed() {
    let nodes = rendered(&["a1b"]);
    assert_eq!(order(&nodes), vec!["a1b"]);
    assert_eq!(nodes[0].states.len(), 4);
}

#[test]
fn given_no_entries_when_render_then_empty() {
    assert!(rendered(&[]).is_empty());
}

// ============================================================
// connector states
// ============================================================

#[test]
fn given_single_note_when_render_then_last_single() {
    let nodes = rendered(&["a"]);
    assert_eq!(nodes[0].states, vec![Last, Single]);
}

#[test]
fn given_two_top_level_notes_with_child_when_render_then_fork_pass_last() {
    // Arrange
    let nodes = rendered(&["b", "a", "a1"]);

    // Assert
    assert_eq!(nodes[0].states, vec![Fork, First]);
    assert_eq!(nodes[1].states, vec![Pass, Last, Single]);
    assert_eq!(nodes[2].states, vec![Last, Single]);
    assert_eq!(nodes[0].glyphs(), "├┬");
    assert_eq!(nodes[1].glyphs(), "│└─");
    assert_eq!(nodes[2].glyphs(), "└─");
}

#[test]
fn given_note_with_three_children_when_render_then_children_fork_until_last() {
    let nodes = rendered(&["a", "a1", "a2", "a3"]);

    assert_eq!(nodes[0].states, vec![Last, First]);
    assert_eq!(nodes[1].states, vec![None, Fork, Single]);
    assert_eq!(nodes[2].states, vec![None, Fork, Single]);
    assert_eq!(nodes[3].states, vec![None, Last, Single]);
}

#[test]
fn given_children_below_implied_node_when_render_then_pass_through_gap() {
    let nodes = rendered(&["a", "a1a", "a1b"]);

    assert_eq!(order(&nodes), vec!["a", "a1a", "a1b"]);
    assert_eq!(nodes[0].states, vec![Last, First]);
    assert_eq!(nodes[1].states, vec![None, Pass, Fork, Single]);
    assert_eq!(nodes[2].states, vec![None, Last, Last, Single]);
    assert_eq!(nodes[1].indent_marker(), " │├─ ");
}

#[test]
fn given_any_tree_when_render_then_one_state_per_segment_plus_root() {
    let nodes = rendered(&["a", "a1", "a1a", "a1a2", "b", "b1"]);
    for node in &nodes {
        let segments = zettl::domain::split_segments(node.payload).len();
        assert_eq!(node.states.len(), segments + 1, "{}", node.payload);
    }
}

// ============================================================
// prefix tree
// ============================================================

#[test]
fn given_duplicate_id_when_from_entries_then_last_payload_wins() {
    let tree = PrefixTree::from_entries(vec![("a1", 1), ("a1", 2)]);
    assert_eq!(tree.len(), 1);

    let nodes = tree.flatten();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].payload, 2);
}

#[test]
fn given_tree_when_find_then_resolves_segment_path() {
    let tree = PrefixTree::from_entries(vec![("a1b", ())]);
    assert!(tree.find(["a", "1", "b"]).is_some());
    assert!(tree.find(["a", "1"]).is_some());
    assert!(tree.find(["a", "2"]).is_none());
}
