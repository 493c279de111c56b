use crate::error::Result;
use crate::ordered_set::{Lookup, OrderedSet};
use crate::rank::{Rank, RankSampler};
use crate::zip_tree::set::{ZipSet, ZipSetIntoIter, ZipSetIter};
use crate::zip_tree::tree::Tree;
use std::cmp::Ordering;

/// The default rank threshold for counting ancestors.
pub const DEFAULT_THRESHOLD: Rank = 1;

/// The ancestors of a key that have a rank of at most the threshold, split by which side of the
/// key they are on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AncestorCount {
    pub found: bool,
    /// Ancestors with a smaller key.
    pub low: usize,
    /// Ancestors with a larger key.
    pub high: usize,
}

pub fn count_ancestors<T: Ord>(tree: &Tree<T>, key: &T, threshold: Rank) -> AncestorCount {
    let mut count = AncestorCount::default();
    let mut curr = tree;
    while let Some(ref node) = *curr {
        match node.key.cmp(key) {
            Ordering::Less => {
                if node.rank <= threshold {
                    count.low += 1;
                }
                curr = &node.right;
            },
            Ordering::Greater => {
                if node.rank <= threshold {
                    count.high += 1;
                }
                curr = &node.left;
            },
            Ordering::Equal => {
                count.found = true;
                break;
            },
        }
    }
    count
}

/// A zip tree set that counts the low-ranked ancestors on the search path of a key.
///
/// An ancestor of a key is low if its key is smaller and high if its key is larger. Only
/// ancestors whose rank is at most the configured threshold are counted. Averaged over many
/// random trees, these counts measure how many small-rank nodes a search passes, which is the
/// quantity bounded in the analysis of zip tree search cost.
///
/// # Examples
/// ```
/// use zip_trees::zip_tree::AncestorCounter;
///
/// let mut counter = AncestorCounter::new();
/// counter.insert_with_rank(5, 2).unwrap();
/// counter.insert_with_rank(3, 0).unwrap();
/// counter.insert_with_rank(4, 1).unwrap();
///
/// counter.set_threshold(1);
/// let count = counter.count_ancestors(&4);
/// assert!(count.found);
/// assert_eq!((count.low, count.high), (0, 0));
///
/// let count = counter.count_ancestors(&3);
/// assert_eq!((count.low, count.high), (0, 1));
/// ```
pub struct AncestorCounter<T> {
    set: ZipSet<T>,
    threshold: Rank,
}

impl<T> AncestorCounter<T>
where
    T: Ord,
{
    /// Constructs a new, empty `AncestorCounter<T>` with the default threshold.
    pub fn new() -> Self {
        Self::with_sampler(RankSampler::new())
    }

    /// Constructs a new, empty `AncestorCounter<T>` with reproducible ranks.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_sampler(RankSampler::from_seed(seed))
    }

    /// Constructs a new, empty `AncestorCounter<T>` drawing ranks from `sampler`.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::rank::RankSampler;
    /// use zip_trees::zip_tree::AncestorCounter;
    ///
    /// let mut counter = AncestorCounter::with_sampler(RankSampler::from_seed(3));
    /// counter.insert(1).unwrap();
    /// assert!(counter.contains(&1));
    /// ```
    pub fn with_sampler(sampler: RankSampler) -> Self {
        AncestorCounter {
            set: ZipSet::with_sampler(sampler),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Returns the highest rank an ancestor may have to be counted.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::AncestorCounter;
    ///
    /// let mut counter: AncestorCounter<u32> = AncestorCounter::new();
    /// assert_eq!(counter.threshold(), 1);
    /// counter.set_threshold(3);
    /// assert_eq!(counter.threshold(), 3);
    /// ```
    pub fn threshold(&self) -> Rank {
        self.threshold
    }

    /// Sets the highest rank an ancestor may have to be counted.
    pub fn set_threshold(&mut self, threshold: Rank) {
        self.threshold = threshold;
    }

    /// Searches for a key and counts the low and high ancestors passed on the way.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::AncestorCounter;
    ///
    /// let mut counter = AncestorCounter::new();
    /// counter.insert_with_rank(1, 0).unwrap();
    /// counter.insert_with_rank(2, 0).unwrap();
    ///
    /// let count = counter.count_ancestors(&3);
    /// assert!(!count.found);
    /// assert_eq!(count.low, 2);
    /// ```
    pub fn count_ancestors(&self, key: &T) -> AncestorCount {
        count_ancestors(self.set.root(), key, self.threshold)
    }

    /// Inserts a key into the counter with a freshly sampled rank. Returns `Error::DuplicateKey` if
    /// the key already exists.
    pub fn insert(&mut self, key: T) -> Result<()> {
        self.set.insert(key)
    }

    /// Inserts a key into the counter with the given rank instead of a sampled one.
    pub fn insert_with_rank(&mut self, key: T, rank: Rank) -> Result<()> {
        self.set.insert_with_rank(key, rank)
    }

    /// Removes a key from the counter and returns it. Returns `Error::EmptyTree` if the counter is
    /// empty and `Error::NotFound` if the key does not exist.
    pub fn remove(&mut self, key: &T) -> Result<T> {
        self.set.remove(key)
    }

    /// Searches for a key and reports how many keys were compared against it.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::AncestorCounter;
    ///
    /// let mut counter = AncestorCounter::new();
    /// counter.insert_with_rank(2, 1).unwrap();
    /// counter.insert_with_rank(1, 0).unwrap();
    ///
    /// let lookup = counter.search(&1);
    /// assert!(lookup.found);
    /// assert_eq!(lookup.comparisons, 2);
    /// assert!(!counter.search(&3).found);
    /// ```
    pub fn search(&self, key: &T) -> Lookup {
        self.set.search(key)
    }

    /// Checks if a key exists in the counter.
    pub fn contains(&self, key: &T) -> bool {
        self.set.contains(key)
    }

    /// Returns the number of edges on the longest path from the root to a leaf, or `-1` if the
    /// counter is empty.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::zip_tree::AncestorCounter;
    ///
    /// let mut counter = AncestorCounter::new();
    /// assert_eq!(counter.depth(), -1);
    /// counter.insert(1).unwrap();
    /// assert_eq!(counter.depth(), 0);
    /// ```
    pub fn depth(&self) -> isize {
        self.set.depth()
    }

    /// Returns the number of elements in the counter.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns `true` if the counter is empty.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Clears the counter, removing all values.
    pub fn clear(&mut self) {
        self.set.clear();
    }

    /// Returns the minimum key of the counter. Returns `None` if the counter is empty.
    pub fn min(&self) -> Option<&T> {
        self.set.min()
    }

    /// Returns the maximum key of the counter. Returns `None` if the counter is empty.
    pub fn max(&self) -> Option<&T> {
        self.set.max()
    }

    /// Returns an iterator over the counter. The iterator will yield keys using in-order traversal.
    pub fn iter(&self) -> ZipSetIter<T> {
        self.set.iter()
    }
}

impl<T> OrderedSet<T> for AncestorCounter<T>
where
    T: Ord,
{
    fn insert(&mut self, key: T) -> Result<()> {
        AncestorCounter::insert(self, key)
    }

    fn delete(&mut self, key: &T) -> Result<T> {
        self.remove(key)
    }

    fn search(&self, key: &T) -> Lookup {
        AncestorCounter::search(self, key)
    }

    fn depth(&self) -> isize {
        AncestorCounter::depth(self)
    }

    fn len(&self) -> usize {
        AncestorCounter::len(self)
    }
}

impl<T> Default for AncestorCounter<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for AncestorCounter<T>
where
    T: Ord,
{
    type Item = T;
    type IntoIter = ZipSetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a AncestorCounter<T>
where
    T: 'a + Ord,
{
    type Item = &'a T;
    type IntoIter = ZipSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{AncestorCount, AncestorCounter, DEFAULT_THRESHOLD};
    use rand::{Rng, SeedableRng, XorShiftRng};

    fn scenario() -> AncestorCounter<u32> {
        let mut counter = AncestorCounter::new();
        for &(key, rank) in &[(5, 2), (3, 0), (8, 1), (1, 0), (4, 0)] {
            counter.insert_with_rank(key, rank).unwrap();
        }
        counter
    }

    #[test]
    fn test_default_threshold() {
        let counter: AncestorCounter<u32> = AncestorCounter::new();
        assert_eq!(counter.threshold(), DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_count_scenario() {
        // 5:2(1:0(_,3:0(_,4:0)),8:1)
        let mut counter = scenario();
        assert_eq!(
            counter.count_ancestors(&4),
            AncestorCount { found: true, low: 2, high: 0 },
        );

        counter.set_threshold(2);
        assert_eq!(
            counter.count_ancestors(&4),
            AncestorCount { found: true, low: 2, high: 1 },
        );
        assert_eq!(
            counter.count_ancestors(&7),
            AncestorCount { found: false, low: 1, high: 1 },
        );

        counter.set_threshold(0);
        assert_eq!(
            counter.count_ancestors(&7),
            AncestorCount { found: false, low: 0, high: 0 },
        );
        assert_eq!(
            counter.count_ancestors(&5),
            AncestorCount { found: true, low: 0, high: 0 },
        );
    }

    #[test]
    fn test_counts_reset_between_calls() {
        let mut counter = scenario();
        counter.set_threshold(5);
        let first = counter.count_ancestors(&4);
        let second = counter.count_ancestors(&4);
        assert_eq!(first, second);
        assert_eq!(
            counter.count_ancestors(&5),
            AncestorCount { found: true, low: 0, high: 0 },
        );
    }

    #[test]
    fn test_counts_bounded_by_depth() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([5, 4, 3, 2]);
        let mut keys = (0..2000).collect::<Vec<u32>>();
        rng.shuffle(&mut keys);
        let mut counter = AncestorCounter::with_seed(17);
        for &key in &keys {
            counter.insert(key).unwrap();
        }
        for threshold in 0..4 {
            counter.set_threshold(threshold);
            for key in (0..2000).step_by(37) {
                let count = counter.count_ancestors(&key);
                let lookup = counter.search(&key);
                assert!(count.found);
                assert!(count.low + count.high + 1 <= lookup.comparisons);
            }
        }
        counter.set_threshold(u32::max_value());
        for key in (0..2000).step_by(37) {
            let count = counter.count_ancestors(&key);
            assert_eq!(count.low + count.high + 1, counter.search(&key).comparisons);
        }
    }
}
