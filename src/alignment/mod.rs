//! Decoded multiple sequence alignments and the readers that produce them

pub mod parse;
pub mod record;
pub mod stats;

pub use parse::*;
pub use record::*;
pub use stats::*;
