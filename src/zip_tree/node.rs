use crate::rank::Rank;
use crate::zip_tree::tree::Tree;

/// A struct representing an internal node of a zip tree.
pub struct Node<T> {
    pub key: T,
    pub rank: Rank,
    pub left: Tree<T>,
    pub right: Tree<T>,
}

impl<T> Node<T> {
    pub fn new(key: T, rank: Rank) -> Self {
        Node {
            key,
            rank,
            left: None,
            right: None,
        }
    }
}
