//! Single tree rotations.
//!
//! Both rotations are O(1): they touch the pivot node, its promoted child,
//! the one grandchild that switches sides, and the pivot's former parent
//! (or the root reference). Every affected parent back-link is repaired in
//! the same step, so the arena is link-consistent again on return.

use super::node::{Arena, Direction, NodeId};

/// Left rotation around `node`, promoting its right child:
///
/// ```text
///   node              pivot
///   /  \              /   \
///  a   pivot   →   node    c
///      /  \        /  \
///     b    c      a    b
/// ```
///
/// No-op when `node` has no right child.
pub fn rotate_left<K>(arena: &mut Arena<K>, node: NodeId) {
    rotate(arena, node, Direction::Left);
}

/// Right rotation around `node`, promoting its left child. Mirror of
/// [`rotate_left`].
pub fn rotate_right<K>(arena: &mut Arena<K>, node: NodeId) {
    rotate(arena, node, Direction::Right);
}

fn rotate<K>(arena: &mut Arena<K>, node: NodeId, dir: Direction) {
    let Some(pivot) = arena.child(node, dir.opposite()) else {
        return;
    };
    let parent = arena.parent(node);
    // Resolve the slot before any link changes.
    let parent_slot = arena.child_slot(node);
    let inner = arena.child(pivot, dir);

    // The pivot's inner subtree switches sides.
    *arena.child_mut(node, dir.opposite()) = inner;
    if let Some(inner) = inner {
        arena.node_mut(inner).parent = Some(node);
    }

    // Promote the pivot over the node.
    *arena.child_mut(pivot, dir) = Some(node);
    arena.node_mut(pivot).parent = parent;
    arena.node_mut(node).parent = Some(pivot);

    match (parent, parent_slot) {
        (Some(parent), Some(slot)) => *arena.child_mut(parent, slot) = Some(pivot),
        _ => arena.set_root(Some(pivot)),
    }
}
