use crate::error::{Error, Result};
use crate::ordered_set::{Lookup, OrderedSet};
use crate::rank::{Rank, RankSampler};
use crate::zip_tree::node::Node;
use crate::zip_tree::set::{ZipSetIntoIter, ZipSetIter};
use crate::zip_tree::tree::{self, Tree};
use log::{debug, trace};
use std::cmp::Ordering;

// The root of a subtree after an insertion below it. `Raised` means the inserted node ended up as
// the root and its parent still has to decide whether to keep it as a child or to sit below it.
enum Insertion<T> {
    Settled(Box<Node<T>>),
    Raised(Box<Node<T>>),
}

fn insert<T: Ord>(tree: Tree<T>, new_node: Box<Node<T>>) -> Insertion<T> {
    let mut node = match tree {
        Some(node) => node,
        None => return Insertion::Raised(new_node),
    };

    if new_node.key < node.key {
        match insert(node.left.take(), new_node) {
            Insertion::Settled(subtree) => node.left = Some(subtree),
            Insertion::Raised(mut raised) => {
                if raised.rank < node.rank {
                    node.left = Some(raised);
                } else {
                    node.left = raised.right.take();
                    raised.right = Some(node);
                    return Insertion::Raised(raised);
                }
            },
        }
    } else {
        match insert(node.right.take(), new_node) {
            Insertion::Settled(subtree) => node.right = Some(subtree),
            Insertion::Raised(mut raised) => {
                if raised.rank <= node.rank {
                    node.right = Some(raised);
                } else {
                    node.right = raised.left.take();
                    raised.left = Some(node);
                    return Insertion::Raised(raised);
                }
            },
        }
    }
    Insertion::Settled(node)
}

/// Merges two trees where every key of `left` is smaller than every key of `right`.
pub fn merge<T>(left: Tree<T>, right: Tree<T>) -> Tree<T> {
    match (left, right) {
        (Some(mut left_node), Some(mut right_node)) => {
            if left_node.rank < right_node.rank {
                right_node.left = merge(Some(left_node), right_node.left.take());
                Some(right_node)
            } else {
                left_node.right = merge(left_node.right.take(), Some(right_node));
                Some(left_node)
            }
        },
        (tree, None) | (None, tree) => tree,
    }
}

fn remove<T: Ord>(tree: &mut Tree<T>, key: &T) -> Option<T> {
    let ordering = match *tree {
        Some(ref node) => key.cmp(&node.key),
        None => return None,
    };
    match ordering {
        Ordering::Less => tree.as_mut().and_then(|node| remove(&mut node.left, key)),
        Ordering::Greater => tree.as_mut().and_then(|node| remove(&mut node.right, key)),
        Ordering::Equal => tree.take().map(|node| {
            let Node { key, left, right, .. } = *node;
            *tree = merge(left, right);
            key
        }),
    }
}

/// An ordered set implemented by a zip tree with recursive insertion and deletion.
///
/// Insertion descends recursively and unzips on the way back up: when the new node rises to the
/// top of a subtree, the parent either adopts it as a child or, if the new node outranks it,
/// moves below it. Deletion merges the two subtrees of the removed node recursively. For the same
/// sequence of ranks the resulting trees are identical to those of [`ZipSet`].
///
/// # Examples
/// ```
/// use zip_trees::zip_tree::RecursiveZipSet;
///
/// let mut set = RecursiveZipSet::new();
/// set.insert(0).unwrap();
/// set.insert(3).unwrap();
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.max(), Some(&3));
/// assert_eq!(set.remove(&3), Ok(3));
/// ```
///
/// [`ZipSet`]: struct.ZipSet.html
pub struct RecursiveZipSet<T> {
    root: Tree<T>,
    sampler: RankSampler,
    len: usize,
}

impl<T> RecursiveZipSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `RecursiveZipSet<T>`.
    pub fn new() -> Self {
        Self::with_sampler(RankSampler::new())
    }

    /// Constructs a new, empty `RecursiveZipSet<T>` with reproducible ranks.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_sampler(RankSampler::from_seed(seed))
    }

    /// Constructs a new, empty `RecursiveZipSet<T>` drawing ranks from `sampler`.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::rank::RankSampler;
    /// use zip_trees::zip_tree::RecursiveZipSet;
    ///
    /// let mut set = RecursiveZipSet::with_sampler(RankSampler::from_seed(3));
    /// set.insert(1).unwrap();
    /// assert!(set.contains(&1));
    /// ```
    pub fn with_sampler(sampler: RankSampler) -> Self {
        RecursiveZipSet {
            root: None,
            sampler,
            len: 0,
        }
    }

    /// Inserts a key into the set. Returns `Error::DuplicateKey` if the key already exists.
    pub fn insert(&mut self, key: T) -> Result<()> {
        self.check_absent(&key)?;
        let rank = self.sampler.sample();
        self.insert_unchecked(key, rank);
        Ok(())
    }

    /// Inserts a key into the set with the given rank instead of a sampled one.
    pub fn insert_with_rank(&mut self, key: T, rank: Rank) -> Result<()> {
        self.check_absent(&key)?;
        self.insert_unchecked(key, rank);
        Ok(())
    }

    fn check_absent(&self, key: &T) -> Result<()> {
        if tree::contains(&self.root, key) {
            debug!("rejected insertion of a duplicate key");
            return Err(Error::DuplicateKey);
        }
        Ok(())
    }

    fn insert_unchecked(&mut self, key: T, rank: Rank) {
        trace!("recursively inserting node of rank {}", rank);
        let new_node = Box::new(Node::new(key, rank));
        self.root = match insert(self.root.take(), new_node) {
            Insertion::Settled(root) | Insertion::Raised(root) => Some(root),
        };
        self.len += 1;
    }

    /// Removes a key from the set and returns it. Returns `Error::EmptyTree` if the set is empty
    /// and `Error::NotFound` if the key does not exist.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::Error;
    /// use zip_trees::zip_tree::RecursiveZipSet;
    ///
    /// let mut set = RecursiveZipSet::new();
    /// assert_eq!(set.remove(&1), Err(Error::EmptyTree));
    /// set.insert(1).unwrap();
    /// assert_eq!(set.remove(&2), Err(Error::NotFound));
    /// assert_eq!(set.remove(&1), Ok(1));
    /// ```
    pub fn remove(&mut self, key: &T) -> Result<T> {
        if self.root.is_none() {
            return Err(Error::EmptyTree);
        }
        match remove(&mut self.root, key) {
            Some(key) => {
                self.len -= 1;
                Ok(key)
            },
            None => {
                debug!("key to remove does not exist");
                Err(Error::NotFound)
            },
        }
    }

    /// Searches for a key and reports how many keys were compared against it.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::RecursiveZipSet;
    ///
    /// let mut set = RecursiveZipSet::new();
    /// set.insert_with_rank(2, 1).unwrap();
    /// set.insert_with_rank(1, 0).unwrap();
    ///
    /// let lookup = set.search(&1);
    /// assert!(lookup.found);
    /// assert_eq!(lookup.comparisons, 2);
    /// assert!(!set.search(&3).found);
    /// ```
    pub fn search(&self, key: &T) -> Lookup {
        tree::search(&self.root, key)
    }

    /// Checks if a key exists in the set.
    pub fn contains(&self, key: &T) -> bool {
        tree::contains(&self.root, key)
    }

    /// Returns the number of edges on the longest path from the root to a leaf, or `-1` if the
    /// set is empty.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::RecursiveZipSet;
    ///
    /// let mut set = RecursiveZipSet::new();
    /// assert_eq!(set.depth(), -1);
    /// set.insert(1).unwrap();
    /// assert_eq!(set.depth(), 0);
    /// ```
    pub fn depth(&self) -> isize {
        tree::depth(&self.root)
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clears the set, removing all values.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.root)
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.root)
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    pub fn iter(&self) -> ZipSetIter<T> {
        ZipSetIter::new(&self.root)
    }
}

impl<T> OrderedSet<T> for RecursiveZipSet<T>
where
    T: Ord,
{
    fn insert(&mut self, key: T) -> Result<()> {
        RecursiveZipSet::insert(self, key)
    }

    fn delete(&mut self, key: &T) -> Result<T> {
        self.remove(key)
    }

    fn search(&self, key: &T) -> Lookup {
        RecursiveZipSet::search(self, key)
    }

    fn depth(&self) -> isize {
        RecursiveZipSet::depth(self)
    }

    fn len(&self) -> usize {
        RecursiveZipSet::len(self)
    }
}

impl<T> Default for RecursiveZipSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for RecursiveZipSet<T>
where
    T: Ord,
{
    type Item = T;
    type IntoIter = ZipSetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        ZipSetIntoIter::new(self.root)
    }
}

impl<'a, T> IntoIterator for &'a RecursiveZipSet<T>
where
    T: 'a + Ord,
{
    type Item = &'a T;
    type IntoIter = ZipSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
