mod error;

pub mod driver;
pub mod prelude;
pub mod testing;
pub mod tree;

#[doc(hidden)]
/// This is a hidden module to make the macros defined on this crate available for the users.
pub mod __dependencies {
    pub use paste;
    pub use proptest;
    pub use test_strategy;
}

#[macro_export]
macro_rules! test_splay_policy_properties {
    ($policy:ident) => {
        $crate::__dependencies::paste::paste! {
            mod [<test_policy_$policy:snake>] {
                use $crate::__dependencies::{
                    proptest::prelude::*,
                    test_strategy,
                };
                use $crate::tree::SplayTree;

                use super::$policy;

                type Tree = SplayTree<i64, $policy>;

                #[test_strategy::proptest(fork = false)]
                fn bst_invariant_holds_after_every_insert(keys: Vec<i64>) {
                    let mut tree = Tree::new();
                    for key in keys {
                        tree.insert(key);
                        prop_assert!(tree.validate());
                    }
                }

                #[test_strategy::proptest(fork = false)]
                fn inserted_keys_stay_contained(keys: Vec<i64>, probes: Vec<i64>) {
                    let mut tree = Tree::new();
                    for key in &keys {
                        tree.insert(*key);
                    }
                    for probe in &probes {
                        let _ = tree.find(probe);
                    }
                    for key in &keys {
                        prop_assert!(tree.contains(key));
                    }
                }

                #[test_strategy::proptest(fork = false)]
                fn insert_is_idempotent(keys: Vec<i64>) {
                    let mut tree = Tree::new();
                    for key in &keys {
                        tree.insert(*key);
                    }
                    let before: Vec<i64> = tree.in_order().into_iter().copied().collect();
                    let len = tree.len();
                    for key in &keys {
                        tree.insert(*key);
                    }
                    let after: Vec<i64> = tree.in_order().into_iter().copied().collect();
                    prop_assert_eq!(before, after);
                    prop_assert_eq!(len, tree.len());
                }

                #[test_strategy::proptest(fork = false)]
                fn find_promotes_hits_to_the_root(mut tree: Tree, index: usize) {
                    prop_assume!(!tree.is_empty());
                    let keys: Vec<i64> = tree.in_order().into_iter().copied().collect();
                    let key = keys[index % keys.len()];
                    prop_assert_eq!(tree.find(&key).copied(), Some(key));
                    prop_assert_eq!(tree.root_key().copied(), Some(key));
                    prop_assert!(tree.validate());
                }

                #[test_strategy::proptest(fork = false)]
                fn find_miss_promotes_a_probe_neighbor(mut tree: Tree, probe: i64) {
                    prop_assume!(!tree.is_empty());
                    let keys: Vec<i64> = tree.in_order().into_iter().copied().collect();
                    prop_assume!(!keys.contains(&probe));

                    prop_assert!(tree.find(&probe).is_none());
                    let root = tree.root_key().copied();
                    let predecessor = keys.iter().copied().filter(|key| *key < probe).max();
                    let successor = keys.iter().copied().filter(|key| *key > probe).min();
                    prop_assert!(
                        root == predecessor || root == successor,
                        "root {:?} is neither predecessor {:?} nor successor {:?}",
                        root, predecessor, successor
                    );
                    prop_assert!(tree.validate());
                }

                #[test_strategy::proptest(fork = false)]
                fn probes_leave_the_tree_valid(mut tree: Tree, probes: Vec<i64>) {
                    for probe in &probes {
                        let _ = tree.find(probe);
                        prop_assert!(tree.validate());
                    }
                }

                #[test_strategy::proptest(fork = false)]
                fn contains_agrees_with_the_stored_key_set(mut tree: Tree, probe: i64) {
                    let expected = tree.in_order().into_iter().any(|key| *key == probe);
                    prop_assert_eq!(tree.contains(&probe), expected);
                }

                #[test]
                fn empty_tree_probes_are_total() {
                    let mut tree = Tree::new();
                    assert!(!tree.contains(&0));
                    assert!(tree.find(&0).is_none());
                    assert!(tree.validate());
                    assert_eq!(tree.length_of_last_find(), 0);
                    assert_eq!(tree.len(), 0);
                    assert!(tree.is_empty());
                }
            }
        }
    };
}
