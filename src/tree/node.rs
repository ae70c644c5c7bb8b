/// Stable index of a node inside its tree's arena.
///
/// Nodes are never deallocated individually (the tree supports no deletion),
/// so an id stays valid for the lifetime of the arena that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn new(index: usize) -> Self {
        NodeId(u32::try_from(index).expect("arena holds more than u32::MAX nodes"))
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which child slot a node occupies under its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A single tree cell: a key plus links to its neighbors.
///
/// The parent link is a plain back-reference used for upward navigation during
/// rotations; ownership flows strictly top-down through the arena.
#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

/// Index-addressed node store backing a [`SplayTree`](crate::tree::SplayTree).
///
/// All structural state lives here: the node cells and the current root.
/// Rotations and splay policies mutate the arena through the crate-internal
/// accessors; external code observes it through the read-only ones.
#[derive(Clone, Debug)]
pub struct Arena<K> {
    nodes: Vec<Node<K>>,
    root: Option<NodeId>,
}

impl<K> Default for Arena<K> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }
}

impl<K> Arena<K> {
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn key(&self, id: NodeId) -> &K {
        &self.node(id).key
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right
    }

    pub fn child(&self, id: NodeId, dir: Direction) -> Option<NodeId> {
        match dir {
            Direction::Left => self.node(id).left,
            Direction::Right => self.node(id).right,
        }
    }

    /// Which slot `id` occupies under its parent, or `None` for the root.
    ///
    /// Panics if the parent does not list `id` as a child: that is a corrupt
    /// linkage, an internal defect that must never be papered over.
    pub fn child_slot(&self, id: NodeId) -> Option<Direction> {
        let parent = self.parent(id)?;
        let node = self.node(parent);
        if node.left == Some(id) {
            Some(Direction::Left)
        } else if node.right == Some(id) {
            Some(Direction::Right)
        } else {
            panic!("node {id:?} is not a child of its recorded parent {parent:?}; tree linkage is corrupt");
        }
    }

    pub(crate) fn alloc(&mut self, key: K) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            key,
            parent: None,
            left: None,
            right: None,
        });
        id
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn child_mut(&mut self, id: NodeId, dir: Direction) -> &mut Option<NodeId> {
        match dir {
            Direction::Left => &mut self.node_mut(id).left,
            Direction::Right => &mut self.node_mut(id).right,
        }
    }

    /// Full parent/child bidirectional consistency check, used by tests after
    /// every mutation.
    #[cfg(test)]
    pub(crate) fn links_consistent(&self) -> bool {
        let Some(root) = self.root else {
            return self.nodes.is_empty();
        };
        if self.node(root).parent.is_some() {
            return false;
        }
        for index in 0..self.nodes.len() {
            let id = NodeId::new(index);
            let node = self.node(id);
            if node.left.is_some() && node.left == node.right {
                return false;
            }
            for child in [node.left, node.right].into_iter().flatten() {
                if self.node(child).parent != Some(id) {
                    return false;
                }
            }
            match node.parent {
                Some(parent) => {
                    let parent = self.node(parent);
                    if parent.left != Some(id) && parent.right != Some(id) {
                        return false;
                    }
                }
                None => {
                    if id != root {
                        return false;
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_arena_is_consistent() {
        let arena: Arena<i32> = Arena::default();
        assert!(arena.is_empty());
        assert_eq!(arena.root(), None);
        assert!(arena.links_consistent());
    }

    #[test]
    fn alloc_produces_detached_nodes() {
        let mut arena = Arena::default();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.key(a), &1);
        assert_eq!(arena.key(b), &2);
        assert_eq!(arena.parent(a), None);
        assert_eq!(arena.left(a), None);
        assert_eq!(arena.right(a), None);
    }

    #[test]
    fn child_slot_reports_both_sides() {
        let mut arena = Arena::default();
        let root = arena.alloc(2);
        let left = arena.alloc(1);
        let right = arena.alloc(3);
        arena.set_root(Some(root));
        *arena.child_mut(root, Direction::Left) = Some(left);
        arena.node_mut(left).parent = Some(root);
        *arena.child_mut(root, Direction::Right) = Some(right);
        arena.node_mut(right).parent = Some(root);

        assert_eq!(arena.child_slot(root), None);
        assert_eq!(arena.child_slot(left), Some(Direction::Left));
        assert_eq!(arena.child_slot(right), Some(Direction::Right));
        assert!(arena.links_consistent());
    }

    #[test]
    #[should_panic(expected = "tree linkage is corrupt")]
    fn child_slot_panics_on_corrupt_linkage() {
        let mut arena = Arena::default();
        let root = arena.alloc(1);
        let stray = arena.alloc(2);
        arena.set_root(Some(root));
        // Claim a parent that does not link back.
        arena.node_mut(stray).parent = Some(root);
        arena.child_slot(stray);
    }

    #[test]
    fn links_consistent_detects_missing_back_reference() {
        let mut arena = Arena::default();
        let root = arena.alloc(1);
        let child = arena.alloc(2);
        arena.set_root(Some(root));
        *arena.child_mut(root, Direction::Right) = Some(child);
        // Forgot child.parent = root.
        assert!(!arena.links_consistent());
        arena.node_mut(child).parent = Some(root);
        assert!(arena.links_consistent());
    }

    #[test]
    fn opposite_direction_round_trips() {
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::Left.opposite().opposite(), Direction::Left);
    }
}
