use std::error;
use std::fmt;
use std::result;

/// Errors reported by the zip tree operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The key being inserted is already in the tree.
    DuplicateKey,
    /// The key being removed is not in the tree.
    NotFound,
    /// The operation requires a non-empty tree.
    EmptyTree,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DuplicateKey => write!(f, "key already exists in the tree"),
            Error::NotFound => write!(f, "key does not exist in the tree"),
            Error::EmptyTree => write!(f, "tree is empty"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
