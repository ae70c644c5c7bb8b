use super::{
    node::{Arena, Direction, NodeId},
    rotate::{rotate_left, rotate_right},
};

/// A splay policy moves an accessed node to the root through a sequence of
/// rotations.
///
/// Policies are selected at compile time through the tree's type parameter;
/// the tree itself never branches on which policy is active. A policy only
/// needs the one capability: `splay`. The loop invariant shared by both
/// shipped policies is "stop when the node has no parent", which also makes
/// splaying a no-op on the root of any tree, including a freshly inserted
/// singleton.
pub trait SplayPolicy {
    fn splay<K>(arena: &mut Arena<K>, node: NodeId);
}

/// One splay step, classified by the node's position relative to its parent
/// and grandparent. The direction is the slot the node occupies under its
/// parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// Parent is the root.
    Zig(Direction),
    /// Node and parent occupy the same slot under their parents.
    ZigZig(Direction),
    /// Node and parent occupy opposite slots.
    ZigZag(Direction),
}

/// The five position predicates are exhaustive for any node with a parent,
/// provided the linkage is intact; a broken back-link panics inside
/// [`Arena::child_slot`] instead of silently corrupting the tree further.
fn classify<K>(arena: &Arena<K>, node: NodeId, parent: NodeId) -> Step {
    let node_slot = arena
        .child_slot(node)
        .expect("splay step classified on a node without a parent");
    match arena.parent(parent) {
        None => Step::Zig(node_slot),
        Some(_) => {
            let parent_slot = arena
                .child_slot(parent)
                .expect("grandparent disappeared mid-classification");
            if node_slot == parent_slot {
                Step::ZigZig(node_slot)
            } else {
                Step::ZigZag(node_slot)
            }
        }
    }
}

/// The textbook splay: zig, zig-zig and zig-zag steps, two rotations per
/// iteration whenever a grandparent exists. Amortized O(log n) per access.
pub enum DoubleRotation {}

impl SplayPolicy for DoubleRotation {
    fn splay<K>(arena: &mut Arena<K>, node: NodeId) {
        while let Some(parent) = arena.parent(node) {
            match classify(arena, node, parent) {
                Step::Zig(Direction::Left) => rotate_right(arena, parent),
                Step::Zig(Direction::Right) => rotate_left(arena, parent),
                Step::ZigZig(slot) => {
                    let grandparent = arena
                        .parent(parent)
                        .expect("zig-zig step requires a grandparent");
                    match slot {
                        Direction::Left => {
                            rotate_right(arena, grandparent);
                            rotate_right(arena, parent);
                        }
                        Direction::Right => {
                            rotate_left(arena, grandparent);
                            rotate_left(arena, parent);
                        }
                    }
                }
                Step::ZigZag(slot) => {
                    let grandparent = arena
                        .parent(parent)
                        .expect("zig-zag step requires a grandparent");
                    match slot {
                        // Left child of a right child.
                        Direction::Left => {
                            rotate_right(arena, parent);
                            rotate_left(arena, grandparent);
                        }
                        // Right child of a left child.
                        Direction::Right => {
                            rotate_left(arena, parent);
                            rotate_right(arena, grandparent);
                        }
                    }
                }
            }
        }
    }
}

/// One rotation around the immediate parent per iteration, regardless of the
/// grandparent's shape. Simpler than [`DoubleRotation`] but without its
/// amortized guarantee; kept as a behavior and performance baseline.
pub enum Naive {}

impl SplayPolicy for Naive {
    fn splay<K>(arena: &mut Arena<K>, node: NodeId) {
        while let Some(parent) = arena.parent(node) {
            match arena
                .child_slot(node)
                .expect("splaying a node without a parent")
            {
                Direction::Left => rotate_right(arena, parent),
                Direction::Right => rotate_left(arena, parent),
            }
        }
    }
}
