use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 20_000;

macro_rules! zip_set_tests {
    ($($module_name:ident: $type_name:ident$(,)*)*) => {
        $(
            mod $module_name {
                use rand::{Rng, SeedableRng, XorShiftRng};
                use std::collections::BTreeSet;
                use super::NUM_OF_OPERATIONS;
                use zip_trees::zip_tree::$type_name;
                use zip_trees::{Error, OrderedSet};

                #[test]
                fn int_test_set() {
                    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut set = $type_name::with_seed(1);
                    let mut expected = BTreeSet::new();

                    for _ in 0..NUM_OF_OPERATIONS {
                        let key = rng.gen_range(0, 5_000u32);
                        if rng.gen::<bool>() {
                            let res = set.insert(key);
                            if expected.insert(key) {
                                assert_eq!(res, Ok(()));
                            } else {
                                assert_eq!(res, Err(Error::DuplicateKey));
                            }
                        } else {
                            let res = set.remove(&key);
                            if expected.remove(&key) {
                                assert_eq!(res, Ok(key));
                            } else if expected.is_empty() {
                                assert_eq!(res, Err(Error::EmptyTree));
                            } else {
                                assert_eq!(res, Err(Error::NotFound));
                            }
                        }
                        assert_eq!(set.len(), expected.len());
                    }

                    assert_eq!(
                        set.iter().collect::<Vec<&u32>>(),
                        expected.iter().collect::<Vec<&u32>>(),
                    );
                    for key in 0..5_000u32 {
                        assert_eq!(set.contains(&key), expected.contains(&key));
                    }
                }

                #[test]
                fn int_test_search_finds_only_inserted() {
                    let mut rng: XorShiftRng = SeedableRng::from_seed([2, 2, 2, 2]);
                    let mut keys = (0..10_000u32).map(|key| key * 2).collect::<Vec<u32>>();
                    rng.shuffle(&mut keys);

                    let mut set = $type_name::new();
                    for &key in &keys {
                        set.insert(key).unwrap();
                    }

                    let depth = set.depth();
                    for key in 0..20_000u32 {
                        let lookup = set.search(&key);
                        assert_eq!(lookup.found, key % 2 == 0);
                        assert!(lookup.comparisons as isize <= depth + 1);
                    }
                }

                #[test]
                fn int_test_errors() {
                    let mut set = $type_name::new();
                    assert_eq!(set.remove(&1), Err(Error::EmptyTree));
                    assert_eq!(set.insert(1), Ok(()));
                    assert_eq!(set.insert(1), Err(Error::DuplicateKey));
                    assert_eq!(set.remove(&2), Err(Error::NotFound));
                    assert_eq!(set.remove(&1), Ok(1));
                    assert_eq!(set.remove(&1), Err(Error::EmptyTree));
                    assert_eq!(set.depth(), -1);
                }

                #[test]
                fn int_test_ordered_set() {
                    fn exercise<S: OrderedSet<u32>>(set: &mut S) {
                        for key in 0..100 {
                            set.insert(key).unwrap();
                        }
                        assert_eq!(set.len(), 100);
                        assert!(set.contains(&42));
                        assert_eq!(set.delete(&42), Ok(42));
                        assert!(!set.contains(&42));
                        assert!(set.depth() >= 6);
                        assert!(!set.is_empty());
                    }

                    let mut set = $type_name::with_seed(4);
                    exercise(&mut set);
                }

                #[test]
                fn int_test_logarithmic_depth() {
                    let mut rng: XorShiftRng = SeedableRng::from_seed([3, 3, 3, 3]);
                    let mut keys = (0..50_000u32).collect::<Vec<u32>>();
                    rng.shuffle(&mut keys);

                    let mut set = $type_name::with_seed(3);
                    for &key in &keys {
                        set.insert(key).unwrap();
                    }
                    // log2(50_000) is about 15.6
                    assert!(set.depth() < 80, "depth was {}", set.depth());
                }
            }
        )*
    }
}

zip_set_tests!(
    zip_set: ZipSet,
    optimized: OptimizedZipSet,
    recursive: RecursiveZipSet,
    ancestors: AncestorCounter,
);

#[test]
fn int_test_variants_agree() {
    use rand::{Rng, SeedableRng, XorShiftRng};
    use zip_trees::zip_tree::{AncestorCounter, OptimizedZipSet, RecursiveZipSet, ZipSet};

    let mut rng: XorShiftRng = SeedableRng::from_seed([4, 4, 4, 4]);
    let mut iterative = ZipSet::with_seed(6);
    let mut recursive = RecursiveZipSet::with_seed(6);
    let mut counter = AncestorCounter::with_seed(6);
    let mut optimized = OptimizedZipSet::with_seed(6);
    let mut expected = BTreeSet::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 2_000u32);
        if expected.insert(key) {
            iterative.insert(key).unwrap();
            recursive.insert(key).unwrap();
            counter.insert(key).unwrap();
            optimized.insert(key).unwrap();
        } else {
            expected.remove(&key);
            assert_eq!(iterative.remove(&key), Ok(key));
            assert_eq!(recursive.remove(&key), Ok(key));
            assert_eq!(counter.remove(&key), Ok(key));
            assert_eq!(optimized.remove(&key), Ok(key));
        }
    }

    // Same seed and same operations give the same ranks, so the baseline shapes coincide.
    assert_eq!(iterative.depth(), recursive.depth());
    assert_eq!(iterative.depth(), counter.depth());
    for key in 0..2_000u32 {
        assert_eq!(iterative.search(&key), recursive.search(&key));
        assert_eq!(iterative.search(&key), counter.search(&key));
        assert_eq!(optimized.contains(&key), expected.contains(&key));
    }
}
