//! Column and pairwise scoring over a decoded alignment.
//!
//! The numeric conservation score counts gaps as ordinary characters while
//! the symbol classifier strips them first. The two rules give different
//! answers on gapped columns; do not merge them.

pub mod conservation;
pub mod identity;
pub mod symbols;

pub use conservation::*;
pub use identity::*;
pub use symbols::*;
