mod node;
mod policy;
mod rotate;

use std::marker::PhantomData;

use proptest::prelude::*;

pub use {
    node::{Arena, Direction, NodeId},
    policy::{DoubleRotation, Naive, SplayPolicy},
    rotate::{rotate_left, rotate_right},
};

/// A self-adjusting binary search tree over ordered keys.
///
/// Every lookup-style operation walks down from the root by key comparison to
/// the sought key or its closest existing neighbor, then splays that node to
/// the root through the configured [`SplayPolicy`]. The move-to-front bias
/// this produces is what gives splay trees their amortized good behavior on
/// access sequences with locality, including sequences of near-miss lookups.
///
/// The tree stores keys only (no payload values) and supports no deletion;
/// nodes live in an index arena owned by the tree and are released together
/// when the tree is dropped. The number of comparisons performed by the most
/// recent descent is recorded and exposed through
/// [`length_of_last_find`](Self::length_of_last_find) for external
/// instrumentation.
///
/// All operations are total: probing an empty tree or a missing key never
/// rotates below the "no parent means no-op" guard and always leaves the tree
/// a valid search tree, with the closest-matching node promoted to the root.
pub struct SplayTree<K, P: SplayPolicy = DoubleRotation> {
    arena: Arena<K>,
    find_length: usize,
    _policy: PhantomData<P>,
}

impl<K: Clone, P: SplayPolicy> Clone for SplayTree<K, P> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            find_length: self.find_length,
            _policy: PhantomData,
        }
    }
}

impl<K: std::fmt::Debug, P: SplayPolicy> std::fmt::Debug for SplayTree<K, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplayTree")
            .field("len", &self.len())
            .field("root", &self.root_key())
            .finish()
    }
}

impl<K, P: SplayPolicy> Default for SplayTree<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> Arbitrary for SplayTree<K, P>
where
    K: Arbitrary + Ord + 'static,
    P: SplayPolicy + 'static,
{
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        any::<Vec<K>>()
            .prop_map(|keys| {
                let mut tree = Self::new();
                for key in keys {
                    tree.insert(key);
                }
                tree
            })
            .boxed()
    }
}

impl<K, P: SplayPolicy> SplayTree<K, P> {
    /// Constructs a new empty tree.
    pub fn new() -> Self {
        Self {
            arena: Arena::default(),
            find_length: 0,
            _policy: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// The key currently at the root, if any.
    pub fn root_key(&self) -> Option<&K> {
        self.arena.root().map(|root| self.arena.key(root))
    }

    /// The number of comparisons performed by the most recent lookup-style
    /// traversal (a `find`, `contains` or the descent inside `insert`).
    pub fn length_of_last_find(&self) -> usize {
        self.find_length
    }

    /// All keys in ascending order.
    pub fn in_order(&self) -> Vec<&K> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut current = self.arena.root();
        loop {
            while let Some(id) = current {
                stack.push(id);
                current = self.arena.left(id);
            }
            match stack.pop() {
                Some(id) => {
                    out.push(self.arena.key(id));
                    current = self.arena.right(id);
                }
                None => break,
            }
        }
        out
    }
}

impl<K: Ord, P: SplayPolicy> SplayTree<K, P> {
    /// Inserts `key` if not already present.
    ///
    /// The closest existing node is splayed to the root first; on a duplicate
    /// the tree is left structurally unchanged apart from that promotion.
    /// Otherwise the new node becomes a direct child of the new root, taking
    /// over the matching half of the former root's subtree, so the inserted
    /// key always ends at or adjacent to the root.
    pub fn insert(&mut self, key: K) {
        let Some(closest) = self.find_closest(&key) else {
            let id = self.arena.alloc(key);
            self.arena.set_root(Some(id));
            return;
        };
        P::splay(&mut self.arena, closest);

        let root = match self.arena.root() {
            Some(root) => root,
            None => unreachable!("splaying a non-empty tree left it without a root"),
        };
        if *self.arena.key(root) == key {
            return;
        }

        let side = if *self.arena.key(root) < key {
            Direction::Right
        } else {
            Direction::Left
        };
        let id = self.arena.alloc(key);
        let grafted = self.arena.child(root, side);
        *self.arena.child_mut(id, side) = grafted;
        if let Some(grafted) = grafted {
            self.arena.node_mut(grafted).parent = Some(id);
        }
        *self.arena.child_mut(root, side) = Some(id);
        self.arena.node_mut(id).parent = Some(root);
    }

    /// Looks up `key`, splaying the closest node to the root regardless of
    /// whether the key is present, and returns the stored key on a hit.
    pub fn find(&mut self, key: &K) -> Option<&K> {
        let closest = self.find_closest(key)?;
        P::splay(&mut self.arena, closest);

        let root = self.arena.root()?;
        if self.arena.key(root) == key {
            Some(self.arena.key(root))
        } else {
            None
        }
    }

    /// Whether `key` is present. Splays like [`find`](Self::find).
    pub fn contains(&mut self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Verifies the binary-search-tree property: every node's left child key
    /// is at most its own and its right child key is at least its own. The
    /// local check composes into the global guarantee by induction.
    pub fn validate(&self) -> bool {
        let mut stack: Vec<NodeId> = self.arena.root().into_iter().collect();
        while let Some(id) = stack.pop() {
            let key = self.arena.key(id);
            if let Some(left) = self.arena.left(id) {
                if self.arena.key(left) > key {
                    return false;
                }
                stack.push(left);
            }
            if let Some(right) = self.arena.right(id) {
                if self.arena.key(right) < key {
                    return false;
                }
                stack.push(right);
            }
        }
        true
    }

    /// Standard BST descent stopping at an exact match or the deepest node
    /// visited before falling off the tree. Resets and records the traversal
    /// length as a side effect.
    fn find_closest(&mut self, key: &K) -> Option<NodeId> {
        self.find_length = 0;
        let mut current = self.arena.root()?;
        loop {
            let current_key = self.arena.key(current);
            if current_key == key {
                return Some(current);
            }
            let next = if current_key < key {
                self.arena.right(current)
            } else {
                self.arena.left(current)
            };
            self.find_length += 1;
            match next {
                Some(next) => current = next,
                None => return Some(current),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::testing::{key_sequences, shuffled_distinct_keys};

    crate::test_splay_policy_properties!(DoubleRotation);
    crate::test_splay_policy_properties!(Naive);

    fn scenario_keys() -> [i64; 8] {
        [4, 3, 2, 1, 6, 7, 8, 5]
    }

    #[test]
    fn end_to_end_scenario_double_rotation() {
        let mut tree: SplayTree<i64> = SplayTree::new();
        for key in scenario_keys() {
            tree.insert(key);
            assert!(tree.validate());
            assert!(tree.arena.links_consistent());
        }
        for key in scenario_keys() {
            assert!(tree.contains(&key));
        }
        for key in scenario_keys() {
            assert_eq!(tree.find(&key), Some(&key));
            assert_eq!(tree.root_key(), Some(&key));
        }
        assert!(tree.validate());
        assert_eq!(tree.len(), 8);
    }

    #[test]
    fn end_to_end_scenario_naive() {
        let mut tree: SplayTree<i64, Naive> = SplayTree::new();
        for key in scenario_keys() {
            tree.insert(key);
            assert!(tree.validate());
            assert!(tree.arena.links_consistent());
        }
        for key in scenario_keys() {
            assert!(tree.contains(&key));
            assert_eq!(tree.find(&key), Some(&key));
        }
        assert!(tree.validate());
        assert_eq!(tree.len(), 8);
    }

    #[test]
    fn duplicate_insert_leaves_the_key_set_unchanged() {
        let mut tree: SplayTree<i64> = SplayTree::new();
        tree.insert(1);
        tree.insert(2);
        tree.insert(1);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.in_order(), [&1, &2]);
        // The duplicate still splays the matched node to the root.
        assert_eq!(tree.root_key(), Some(&1));
    }

    #[test]
    fn find_length_counts_comparisons() {
        let mut tree: SplayTree<i64> = SplayTree::new();
        assert!(tree.find(&7).is_none());
        assert_eq!(tree.length_of_last_find(), 0);

        tree.insert(7);
        assert_eq!(tree.find(&7), Some(&7));
        assert_eq!(tree.length_of_last_find(), 0);

        assert!(tree.find(&9).is_none());
        assert_eq!(tree.length_of_last_find(), 1);
    }

    #[test]
    fn miss_promotes_the_last_visited_node() {
        let mut tree: SplayTree<i64> = SplayTree::new();
        for key in [10, 20, 30] {
            tree.insert(key);
        }
        assert!(tree.find(&25).is_none());
        let root = *tree.root_key().unwrap();
        // The probe for 25 terminates at its in-order predecessor or successor.
        assert!(root == 20 || root == 30, "unexpected root {root}");
        assert!(tree.validate());
    }

    proptest! {
        #[test]
        fn policies_agree_on_membership(keys in key_sequences(0..64usize), probes in key_sequences(0..16usize)) {
            let mut double: SplayTree<i64, DoubleRotation> = SplayTree::new();
            let mut naive: SplayTree<i64, Naive> = SplayTree::new();
            for key in &keys {
                double.insert(*key);
                naive.insert(*key);
            }
            prop_assert_eq!(double.in_order(), naive.in_order());
            for probe in keys.iter().chain(probes.iter()) {
                prop_assert_eq!(double.contains(probe), naive.contains(probe));
            }
            prop_assert!(double.validate());
            prop_assert!(naive.validate());
        }

        #[test]
        fn in_order_recovers_the_sorted_key_set(keys in shuffled_distinct_keys(0..64usize)) {
            let mut tree: SplayTree<i64> = SplayTree::new();
            for key in &keys {
                tree.insert(*key);
            }
            let mut sorted = keys.clone();
            sorted.sort_unstable();
            let stored: Vec<i64> = tree.in_order().into_iter().copied().collect();
            prop_assert_eq!(stored, sorted);
        }

        #[test]
        fn every_mutation_keeps_links_consistent(keys in key_sequences(0..48usize)) {
            let mut tree: SplayTree<i64> = SplayTree::new();
            for key in &keys {
                tree.insert(*key);
                prop_assert!(tree.arena.links_consistent());
            }
            for key in &keys {
                let _ = tree.find(key);
                prop_assert!(tree.arena.links_consistent());
            }
        }
    }
}
