//! Guide tree handling: lexical re-indentation and a small tree parser for
//! the dendrogram view.

pub mod format;
pub mod tree;

pub use format::*;
pub use tree::*;
