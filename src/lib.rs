//! msaview - protein multiple sequence alignment dashboard
//!
//! Runs an external aligner (or reads an existing alignment), scores it with
//! pairwise identity and per-column conservation, renders it Clustal-style
//! and presents everything in a tabbed terminal dashboard.

pub mod aligner;
pub mod alignment;
pub mod app;
pub mod cli;
pub mod error;
pub mod export;
pub mod logging;
pub mod newick;
pub mod report;
pub mod scoring;
pub mod session;
pub mod ui;

// Re-export main types for convenience
pub use alignment::{Alignment, SeqRecord};
pub use app::App;
pub use error::{MsaError, Result};
pub use report::Report;
