//! Zip trees and their variants.
//!
//! Every structure implements [`OrderedSet`], so they can be compared against each other and
//! against other search structures behind one interface.
//!
//! [`OrderedSet`]: ordered_set/trait.OrderedSet.html

mod error;
pub mod ordered_set;
pub mod rank;
pub mod zip_tree;

pub use crate::error::{Error, Result};
pub use crate::ordered_set::{Lookup, OrderedSet};
