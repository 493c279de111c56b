use crate::ordered_set::Lookup;
use crate::rank::Rank;
use crate::zip_tree::node::Node;
use std::cmp::{self, Ordering};

pub type Tree<T> = Option<Box<Node<T>>>;

/// How an inserted node compares against an existing node of the same rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ties {
    /// Among equal ranks the smaller key stays above, so a tied node may only be a right child.
    Asymmetric,
    /// An inserted node always sinks below existing nodes of the same rank, on either side.
    Symmetric,
}

impl Ties {
    // Whether the insertion of (key, rank) has to continue below `node`.
    fn descends<T: Ord>(self, node: &Node<T>, key: &T, rank: Rank) -> bool {
        match self {
            Ties::Asymmetric => node.rank > rank || (node.rank == rank && node.key < *key),
            Ties::Symmetric => node.rank >= rank,
        }
    }
}

// Splits `tree` by `key` into the nodes with smaller keys and the nodes with larger keys. Only the
// search path of `key` is walked: smaller path nodes are chained through their right slots and
// larger path nodes through their left slots, keeping every off-path subtree intact.
fn unzip<T: Ord>(mut tree: Tree<T>, key: &T) -> (Tree<T>, Tree<T>) {
    let mut smaller: Tree<T> = None;
    let mut larger: Tree<T> = None;
    let mut smaller_tail = &mut smaller;
    let mut larger_tail = &mut larger;

    while let Some(mut node) = tree {
        if node.key < *key {
            tree = node.right.take();
            smaller_tail = &mut smaller_tail.insert(node).right;
        } else {
            tree = node.left.take();
            larger_tail = &mut larger_tail.insert(node).left;
        }
    }

    (smaller, larger)
}

/// Merges two trees where every key of `left` is smaller than every key of `right`. The right
/// spine of `left` and the left spine of `right` are interleaved by descending rank, with ties
/// going to `left`.
pub fn zip<T>(mut left: Tree<T>, mut right: Tree<T>) -> Tree<T> {
    let mut root = None;
    let mut tail = &mut root;

    loop {
        match (left, right) {
            (Some(mut left_node), Some(mut right_node)) => {
                if left_node.rank >= right_node.rank {
                    left = left_node.right.take();
                    right = Some(right_node);
                    tail = &mut tail.insert(left_node).right;
                } else {
                    left = Some(left_node);
                    right = right_node.left.take();
                    tail = &mut tail.insert(right_node).left;
                }
            },
            (rest, None) | (None, rest) => {
                *tail = rest;
                return root;
            },
        }
    }
}

/// Inserts `new_node` into `tree`.
///
/// The descent stops at the first node that does not dominate the new node under `ties`. The new
/// node takes that slot and the displaced subtree is unzipped into its two children.
///
/// The key of `new_node` must not already be in the tree.
pub fn insert<T: Ord>(tree: &mut Tree<T>, mut new_node: Box<Node<T>>, ties: Ties) {
    let mut slot = tree;
    loop {
        let descend = match *slot {
            Some(ref node) => ties.descends(node, &new_node.key, new_node.rank),
            None => false,
        };
        if !descend {
            break;
        }
        slot = match *slot {
            Some(ref mut node) => {
                if new_node.key < node.key {
                    &mut node.left
                } else {
                    &mut node.right
                }
            },
            None => unreachable!(),
        };
    }

    let (left, right) = unzip(slot.take(), &new_node.key);
    new_node.left = left;
    new_node.right = right;
    *slot = Some(new_node);
}

/// Removes `key` from `tree` and zips the children of its node into the vacated slot. Returns
/// `None` if the key does not exist.
pub fn remove<T: Ord>(tree: &mut Tree<T>, key: &T) -> Option<T> {
    let mut slot = tree;
    loop {
        let ordering = match *slot {
            Some(ref node) => key.cmp(&node.key),
            None => return None,
        };
        if ordering == Ordering::Equal {
            break;
        }
        slot = match *slot {
            Some(ref mut node) => {
                if ordering == Ordering::Less {
                    &mut node.left
                } else {
                    &mut node.right
                }
            },
            None => unreachable!(),
        };
    }

    match slot.take() {
        Some(node) => {
            let Node { key, left, right, .. } = *node;
            *slot = zip(left, right);
            Some(key)
        },
        None => unreachable!(),
    }
}

pub fn search<T: Ord>(tree: &Tree<T>, key: &T) -> Lookup {
    let mut comparisons = 0;
    let mut curr = tree;
    while let Some(ref node) = *curr {
        comparisons += 1;
        match key.cmp(&node.key) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return Lookup { found: true, comparisons },
        }
    }
    Lookup { found: false, comparisons }
}

pub fn contains<T: Ord>(tree: &Tree<T>, key: &T) -> bool {
    search(tree, key).found
}

pub fn depth<T>(tree: &Tree<T>) -> isize {
    match *tree {
        Some(ref node) => 1 + cmp::max(depth(&node.left), depth(&node.right)),
        None => -1,
    }
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.key
    })
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.key
    })
}

/// Checks the search tree order and the rank heap order required by `ties`.
#[cfg(test)]
pub fn is_valid<T: Ord>(tree: &Tree<T>, ties: Ties) -> bool {
    fn check<T: Ord>(tree: &Tree<T>, ties: Ties, lower: Option<&T>, upper: Option<&T>) -> bool {
        let node = match *tree {
            Some(ref node) => node,
            None => return true,
        };
        if lower.map_or(false, |lower| node.key <= *lower) {
            return false;
        }
        if upper.map_or(false, |upper| node.key >= *upper) {
            return false;
        }
        if let Some(ref left_node) = node.left {
            let ordered = match ties {
                Ties::Asymmetric => left_node.rank < node.rank,
                Ties::Symmetric => left_node.rank <= node.rank,
            };
            if !ordered {
                return false;
            }
        }
        if let Some(ref right_node) = node.right {
            if right_node.rank > node.rank {
                return false;
            }
        }
        check(&node.left, ties, lower, Some(&node.key))
            && check(&node.right, ties, Some(&node.key), upper)
    }

    check(tree, ties, None, None)
}

/// Renders a tree as `key:rank(left,right)`, with `_` for a missing child.
#[cfg(test)]
pub fn shape<T: std::fmt::Display>(tree: &Tree<T>) -> String {
    match *tree {
        Some(ref node) => {
            if node.left.is_none() && node.right.is_none() {
                format!("{}:{}", node.key, node.rank)
            } else {
                format!("{}:{}({},{})", node.key, node.rank, shape(&node.left), shape(&node.right))
            }
        },
        None => String::from("_"),
    }
}

#[cfg(test)]
mod tests {
    use super::{depth, insert, is_valid, max, min, remove, search, shape, unzip, zip, Ties, Tree};
    use crate::zip_tree::node::Node;

    fn build(keys: &[u32], ranks: &[u32], ties: Ties) -> Tree<u32> {
        let mut tree = None;
        for (&key, &rank) in keys.iter().zip(ranks) {
            insert(&mut tree, Box::new(Node::new(key, rank)), ties);
        }
        tree
    }

    #[test]
    fn test_insert_shape() {
        let tree = build(&[5, 3, 8, 1, 4], &[2, 0, 1, 0, 0], Ties::Asymmetric);
        assert_eq!(shape(&tree), "5:2(1:0(_,3:0(_,4:0)),8:1)");
        assert!(is_valid(&tree, Ties::Asymmetric));
    }

    #[test]
    fn test_remove_root_shape() {
        let mut tree = build(&[5, 3, 8, 1, 4], &[2, 0, 1, 0, 0], Ties::Asymmetric);
        assert_eq!(remove(&mut tree, &5), Some(5));
        assert_eq!(shape(&tree), "8:1(1:0(_,3:0(_,4:0)),_)");
        assert!(is_valid(&tree, Ties::Asymmetric));
    }

    #[test]
    fn test_insert_symmetric_shape() {
        // 1 sinks below 3 instead of displacing it; 4 sinks below 3 on the right.
        let tree = build(&[5, 3, 8, 1, 4], &[2, 0, 1, 0, 0], Ties::Symmetric);
        assert_eq!(shape(&tree), "5:2(3:0(1:0,4:0),8:1)");
        assert!(is_valid(&tree, Ties::Symmetric));
        assert!(!is_valid(&tree, Ties::Asymmetric));
    }

    #[test]
    fn test_unzip_path() {
        let tree = build(&[10, 2, 20, 6, 14, 4, 16], &[3, 2, 2, 1, 1, 0, 0], Ties::Asymmetric);
        assert_eq!(shape(&tree), "10:3(2:2(_,6:1(4:0,_)),20:2(14:1(_,16:0),_))");
        let (smaller, larger) = unzip(tree, &12);
        assert_eq!(shape(&smaller), "10:3(2:2(_,6:1(4:0,_)),_)");
        assert_eq!(shape(&larger), "20:2(14:1(_,16:0),_)");

        let tree = build(&[10, 2, 20, 6, 14, 4, 16], &[3, 2, 2, 1, 1, 0, 0], Ties::Asymmetric);
        let (smaller, larger) = unzip(tree, &5);
        assert_eq!(shape(&smaller), "2:2(_,4:0)");
        assert_eq!(shape(&larger), "10:3(6:1,20:2(14:1(_,16:0),_))");
    }

    #[test]
    fn test_zip_interleaves_by_rank() {
        let left = build(&[1, 3, 5], &[3, 1, 0], Ties::Asymmetric);
        let right = build(&[7, 9, 11], &[2, 1, 0], Ties::Asymmetric);
        assert_eq!(shape(&left), "1:3(_,3:1(_,5:0))");
        assert_eq!(shape(&right), "7:2(_,9:1(_,11:0))");
        let merged = zip(left, right);
        assert_eq!(shape(&merged), "1:3(_,7:2(3:1(_,5:0),9:1(_,11:0)))");
        assert!(is_valid(&merged, Ties::Asymmetric));
    }

    #[test]
    fn test_zip_tie_goes_left() {
        let left = build(&[1], &[1], Ties::Asymmetric);
        let right = build(&[2], &[1], Ties::Asymmetric);
        assert_eq!(shape(&zip(left, right)), "1:1(_,2:1)");
        assert_eq!(shape(&zip::<u32>(None, None)), "_");
    }

    #[test]
    fn test_remove_leaf_and_single_child() {
        let mut tree = build(&[5, 3, 8, 1, 4], &[2, 0, 1, 0, 0], Ties::Asymmetric);
        assert_eq!(remove(&mut tree, &4), Some(4));
        assert_eq!(shape(&tree), "5:2(1:0(_,3:0),8:1)");
        assert_eq!(remove(&mut tree, &1), Some(1));
        assert_eq!(shape(&tree), "5:2(3:0,8:1)");
        assert_eq!(remove(&mut tree, &7), None);
        assert!(is_valid(&tree, Ties::Asymmetric));
    }

    #[test]
    fn test_search_comparisons() {
        let tree = build(&[5, 3, 8, 1, 4], &[2, 0, 1, 0, 0], Ties::Asymmetric);
        let lookup = search(&tree, &4);
        assert!(lookup.found);
        assert_eq!(lookup.comparisons, 4);
        let lookup = search(&tree, &9);
        assert!(!lookup.found);
        assert_eq!(lookup.comparisons, 2);
    }

    #[test]
    fn test_depth_min_max() {
        let empty: Tree<u32> = None;
        assert_eq!(depth(&empty), -1);
        assert_eq!(min(&empty), None);

        let tree = build(&[5, 3, 8, 1, 4], &[2, 0, 1, 0, 0], Ties::Asymmetric);
        assert_eq!(depth(&tree), 3);
        assert_eq!(min(&tree), Some(&1));
        assert_eq!(max(&tree), Some(&8));
    }
}
