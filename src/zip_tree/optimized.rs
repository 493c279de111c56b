use crate::error::Result;
use crate::ordered_set::{Lookup, OrderedSet};
use crate::rank::{Rank, RankSampler};
use crate::zip_tree::set::{ZipSet, ZipSetIntoIter, ZipSetIter};
use crate::zip_tree::tree::Ties;

/// An ordered set implemented by a zip tree whose insertions never stop at a node of equal rank.
///
/// The baseline zip tree only lets a new node pass an equal-rank node when the new key is larger,
/// so runs of equal ranks pile up along right edges. This variant lets a new node sink below every
/// node of the same rank, on either side, which gives shallower trees on average. Removal and
/// search are those of [`ZipSet`].
///
/// # Examples
/// ```
/// use zip_trees::zip_tree::OptimizedZipSet;
///
/// let mut set = OptimizedZipSet::new();
/// set.insert(0).unwrap();
/// set.insert(3).unwrap();
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.remove(&0), Ok(0));
/// assert!(!set.contains(&0));
/// ```
pub struct OptimizedZipSet<T> {
    set: ZipSet<T>,
}

impl<T> OptimizedZipSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `OptimizedZipSet<T>`.
    pub fn new() -> Self {
        Self::with_sampler(RankSampler::new())
    }

    /// Constructs a new, empty `OptimizedZipSet<T>` with reproducible ranks.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_sampler(RankSampler::from_seed(seed))
    }

    /// Constructs a new, empty `OptimizedZipSet<T>` drawing ranks from `sampler`.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::rank::RankSampler;
    /// use zip_trees::zip_tree::OptimizedZipSet;
    ///
    /// let mut set = OptimizedZipSet::with_sampler(RankSampler::from_seed(3));
    /// set.insert(1).unwrap();
    /// assert!(set.contains(&1));
    /// ```
    pub fn with_sampler(sampler: RankSampler) -> Self {
        OptimizedZipSet {
            set: ZipSet::with_ties(sampler, Ties::Symmetric),
        }
    }

    /// Inserts a key into the set. Returns `Error::DuplicateKey` if the key already exists.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::OptimizedZipSet;
    ///
    /// let mut set = OptimizedZipSet::new();
    /// set.insert_with_rank(5, 0).unwrap();
    /// set.insert_with_rank(3, 0).unwrap();
    /// set.insert_with_rank(8, 0).unwrap();
    /// assert_eq!(set.depth(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> Result<()> {
        self.set.insert(key)
    }

    /// Inserts a key into the set with the given rank instead of a sampled one.
    pub fn insert_with_rank(&mut self, key: T, rank: Rank) -> Result<()> {
        self.set.insert_with_rank(key, rank)
    }

    /// Removes a key from the set and returns it. Returns `Error::EmptyTree` if the set is empty
    /// and `Error::NotFound` if the key does not exist.
    pub fn remove(&mut self, key: &T) -> Result<T> {
        self.set.remove(key)
    }

    /// Searches for a key and reports how many keys were compared against it.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::OptimizedZipSet;
    ///
    /// let mut set = OptimizedZipSet::new();
    /// set.insert_with_rank(2, 1).unwrap();
    /// set.insert_with_rank(1, 0).unwrap();
    ///
    /// let lookup = set.search(&1);
    /// assert!(lookup.found);
    /// assert_eq!(lookup.comparisons, 2);
    /// assert!(!set.search(&3).found);
    /// ```
    pub fn search(&self, key: &T) -> Lookup {
        self.set.search(key)
    }

    /// Checks if a key exists in the set.
    pub fn contains(&self, key: &T) -> bool {
        self.set.contains(key)
    }

    /// Returns the number of edges on the longest path from the root to a leaf, or `-1` if the
    /// set is empty.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::OptimizedZipSet;
    ///
    /// let mut set = OptimizedZipSet::new();
    /// assert_eq!(set.depth(), -1);
    /// set.insert(1).unwrap();
    /// assert_eq!(set.depth(), 0);
    /// ```
    pub fn depth(&self) -> isize {
        self.set.depth()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Clears the set, removing all values.
    pub fn clear(&mut self) {
        self.set.clear();
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    pub fn min(&self) -> Option<&T> {
        self.set.min()
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    pub fn max(&self) -> Option<&T> {
        self.set.max()
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    pub fn iter(&self) -> ZipSetIter<T> {
        self.set.iter()
    }
}

impl<T> OrderedSet<T> for OptimizedZipSet<T>
where
    T: Ord,
{
    fn insert(&mut self, key: T) -> Result<()> {
        OptimizedZipSet::insert(self, key)
    }

    fn delete(&mut self, key: &T) -> Result<T> {
        self.remove(key)
    }

    fn search(&self, key: &T) -> Lookup {
        OptimizedZipSet::search(self, key)
    }

    fn depth(&self) -> isize {
        OptimizedZipSet::depth(self)
    }

    fn len(&self) -> usize {
        OptimizedZipSet::len(self)
    }
}

impl<T> Default for OptimizedZipSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for OptimizedZipSet<T>
where
    T: Ord,
{
    type Item = T;
    type IntoIter = ZipSetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OptimizedZipSet<T>
where
    T: 'a + Ord,
{
    type Item = &'a T;
    type IntoIter = ZipSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
