use crate::error::{Error, Result};
use crate::ordered_set::{Lookup, OrderedSet};
use crate::rank::{Rank, RankSampler};
use crate::zip_tree::node::Node;
use crate::zip_tree::tree::{self, Ties};
use log::{debug, trace};

/// An ordered set implemented by a zip tree.
///
/// A zip tree is a binary search tree in which every node carries a rank drawn from a geometric
/// distribution. Ranks are heap ordered: a node's rank is at least the rank of its children, and
/// among nodes of equal rank the one with the smaller key is the ancestor. Insertion unzips the
/// search path below the new node into its two subtrees and deletion zips the two subtrees of the
/// removed node back together, so the tree never rotates. The expected depth is logarithmic in
/// the number of keys.
///
/// # Examples
/// ```
/// use zip_trees::zip_tree::ZipSet;
///
/// let mut set = ZipSet::new();
/// set.insert(0).unwrap();
/// set.insert(3).unwrap();
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(&3));
/// assert_eq!(set.min(), Some(&0));
///
/// assert_eq!(set.remove(&0), Ok(0));
/// assert!(set.remove(&1).is_err());
/// ```
pub struct ZipSet<T> {
    root: tree::Tree<T>,
    sampler: RankSampler,
    ties: Ties,
    len: usize,
}

impl<T> ZipSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `ZipSet<T>` with ranks drawn from an entropy-seeded sampler.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::ZipSet;
    ///
    /// let set: ZipSet<u32> = ZipSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_sampler(RankSampler::new())
    }

    /// Constructs a new, empty `ZipSet<T>` whose shape is reproducible for a given `seed` and
    /// sequence of operations.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::ZipSet;
    ///
    /// let mut a = ZipSet::with_seed(1);
    /// let mut b = ZipSet::with_seed(1);
    /// for key in 0..100 {
    ///     a.insert(key).unwrap();
    ///     b.insert(key).unwrap();
    /// }
    /// assert_eq!(a.depth(), b.depth());
    /// ```
    pub fn with_seed(seed: u64) -> Self {
        Self::with_sampler(RankSampler::from_seed(seed))
    }

    /// Constructs a new, empty `ZipSet<T>` drawing ranks from `sampler`.
    pub fn with_sampler(sampler: RankSampler) -> Self {
        Self::with_ties(sampler, Ties::Asymmetric)
    }

    pub(crate) fn with_ties(sampler: RankSampler, ties: Ties) -> Self {
        ZipSet {
            root: None,
            sampler,
            ties,
            len: 0,
        }
    }

    /// Inserts a key into the set with a freshly sampled rank. Returns `Error::DuplicateKey` and
    /// leaves the set untouched if the key already exists.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::Error;
    /// use zip_trees::zip_tree::ZipSet;
    ///
    /// let mut set = ZipSet::new();
    /// assert_eq!(set.insert(1), Ok(()));
    /// assert!(set.contains(&1));
    /// assert_eq!(set.insert(1), Err(Error::DuplicateKey));
    /// ```
    pub fn insert(&mut self, key: T) -> Result<()> {
        self.check_absent(&key)?;
        let rank = self.sampler.sample();
        self.insert_unchecked(key, rank);
        Ok(())
    }

    /// Inserts a key into the set with the given rank instead of a sampled one.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::ZipSet;
    ///
    /// let mut set = ZipSet::new();
    /// set.insert_with_rank(5, 2).unwrap();
    /// set.insert_with_rank(3, 0).unwrap();
    /// set.insert_with_rank(8, 1).unwrap();
    /// assert_eq!(set.depth(), 1);
    /// ```
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
        trace!("inserting node of rank {} with {:?} ties", rank, self.ties);
        tree::insert(&mut self.root, Box::new(Node::new(key, rank)), self.ties);
        self.len += 1;
    }

    /// Removes a key from the set and returns it. Returns `Error::EmptyTree` if the set is empty
    /// and `Error::NotFound` if the key does not exist.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::Error;
    /// use zip_trees::zip_tree::ZipSet;
    ///
    /// let mut set = ZipSet::new();
    /// assert_eq!(set.remove(&1), Err(Error::EmptyTree));
    /// set.insert(1).unwrap();
    /// assert_eq!(set.remove(&2), Err(Error::NotFound));
    /// assert_eq!(set.remove(&1), Ok(1));
    /// ```
    pub fn remove(&mut self, key: &T) -> Result<T> {
        if self.root.is_none() {
            return Err(Error::EmptyTree);
        }
        match tree::remove(&mut self.root, key) {
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
    /// use zip_trees::zip_tree::ZipSet;
    ///
    /// let mut set = ZipSet::new();
    /// set.insert_with_rank(2, 1).unwrap();
    /// set.insert_with_rank(1, 0).unwrap();
    ///
    /// let lookup = set.search(&1);
    /// assert!(lookup.found);
    /// assert_eq!(lookup.comparisons, 2);
    /// ```
    pub fn search(&self, key: &T) -> Lookup {
        tree::search(&self.root, key)
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::ZipSet;
    ///
    /// let mut set = ZipSet::new();
    /// set.insert(1).unwrap();
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        tree::contains(&self.root, key)
    }

    /// Returns the number of edges on the longest path from the root to a leaf, or `-1` if the
    /// set is empty.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::ZipSet;
    ///
    /// let mut set = ZipSet::new();
    /// assert_eq!(set.depth(), -1);
    /// set.insert(1).unwrap();
    /// assert_eq!(set.depth(), 0);
    /// ```
    pub fn depth(&self) -> isize {
        tree::depth(&self.root)
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::ZipSet;
    ///
    /// let mut set = ZipSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::ZipSet;
    ///
    /// let set: ZipSet<u32> = ZipSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::ZipSet;
    ///
    /// let mut set = ZipSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(2).unwrap();
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::ZipSet;
    ///
    /// let mut set = ZipSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.root)
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::ZipSet;
    ///
    /// let mut set = ZipSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.root)
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::ZipSet;
    ///
    /// let mut set = ZipSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(2).unwrap();
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> ZipSetIter<T> {
        ZipSetIter::new(&self.root)
    }

    pub(crate) fn root(&self) -> &tree::Tree<T> {
        &self.root
    }
}

impl<T> OrderedSet<T> for ZipSet<T>
where
    T: Ord,
{
    fn insert(&mut self, key: T) -> Result<()> {
        ZipSet::insert(self, key)
    }

    fn delete(&mut self, key: &T) -> Result<T> {
        self.remove(key)
    }

    fn search(&self, key: &T) -> Lookup {
        ZipSet::search(self, key)
    }

    fn depth(&self) -> isize {
        ZipSet::depth(self)
    }

    fn len(&self) -> usize {
        ZipSet::len(self)
    }
}

impl<T> Default for ZipSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for ZipSet<T>
where
    T: Ord,
{
    type Item = T;
    type IntoIter = ZipSetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        ZipSetIntoIter::new(self.root)
    }
}

impl<'a, T> IntoIterator for &'a ZipSet<T>
where
    T: 'a + Ord,
{
    type Item = &'a T;
    type IntoIter = ZipSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for the zip tree sets.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct ZipSetIntoIter<T> {
    current: tree::Tree<T>,
    stack: Vec<Node<T>>,
}

impl<T> ZipSetIntoIter<T> {
    pub(crate) fn new(root: tree::Tree<T>) -> Self {
        ZipSetIntoIter {
            current: root,
            stack: Vec::new(),
        }
    }
}

impl<T> Iterator for ZipSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { key, right, .. } = node;
            self.current = right;
            key
        })
    }
}

/// An iterator for the zip tree sets.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct ZipSetIter<'a, T>
where
    T: 'a,
{
    current: &'a tree::Tree<T>,
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> ZipSetIter<'a, T>
where
    T: 'a,
{
    pub(crate) fn new(root: &'a tree::Tree<T>) -> Self {
        ZipSetIter {
            current: root,
            stack: Vec::new(),
        }
    }
}

impl<'a, T> Iterator for ZipSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = *self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            let Node { key, right, .. } = node;
            self.current = right;
            key
        })
    }
}
