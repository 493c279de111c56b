//! Randomized binary search trees whose shape is determined by geometric node ranks and which are
//! restructured by unzipping and zipping search paths instead of rotating.

mod ancestors;
mod node;
mod optimized;
mod recursive;
mod set;
mod tree;

pub use self::ancestors::{AncestorCount, AncestorCounter, DEFAULT_THRESHOLD};
pub use self::optimized::OptimizedZipSet;
pub use self::recursive::RecursiveZipSet;
pub use self::set::{ZipSet, ZipSetIntoIter, ZipSetIter};
