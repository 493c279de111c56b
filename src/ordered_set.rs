use crate::error::Result;

/// The outcome of a search: whether the key was found and how many keys were compared against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lookup {
    pub found: bool,
    pub comparisons: usize,
}

/// The operations shared by every search structure in this crate.
///
/// Per-call measurements such as the number of comparisons are part of the returned values rather
/// than state stored on the structure.
pub trait OrderedSet<T>
where
    T: Ord,
{
    /// Inserts a key. Fails with `Error::DuplicateKey` if the key is already present.
    fn insert(&mut self, key: T) -> Result<()>;

    /// Removes a key and returns it. Fails with `Error::EmptyTree` on an empty structure and with
    /// `Error::NotFound` if the key is absent.
    fn delete(&mut self, key: &T) -> Result<T>;

    /// Searches for a key, counting the keys compared along the way.
    fn search(&self, key: &T) -> Lookup;

    /// Returns the number of edges on the longest root-to-leaf path, or `-1` if empty.
    fn depth(&self) -> isize;

    /// Returns the number of keys.
    fn len(&self) -> usize;

    fn contains(&self, key: &T) -> bool {
        self.search(key).found
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
