//! Static analysis of expression trees.

mod identifiers;


pub use identifiers::{DYNAMIC_LOOKUP, read_identifiers, unique_identifiers};
