//! Black-box access to the external aligners.
//!
//! The aligner binaries do the real work; this module only prepares their
//! command lines, checks their exit status and decodes what they wrote.

pub mod tools;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use clap::ValueEnum;
use log::{info, warn};

use crate::alignment::Alignment;
use crate::error::{MsaError, Result};
use crate::newick::NewickFormatter;

pub use tools::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Algorithm {
    #[value(name = "clustalw")]
    ClustalW,
    #[value(name = "muscle")]
    Muscle,
}

impl Algorithm {
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::ClustalW => "ClustalW",
            Algorithm::Muscle => "MUSCLE",
        }
    }

    /// Short name used in exported file names
    pub fn file_tag(self) -> &'static str {
        match self {
            Algorithm::ClustalW => "clustal",
            Algorithm::Muscle => "muscle",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct AlignerOutput {
    pub alignment: Alignment,
    pub alignment_file: PathBuf,
    pub guide_tree_file: Option<PathBuf>,
}

pub trait Aligner {
    fn algorithm(&self) -> Algorithm;

    /// Align the FASTA file at `input`, writing tool output under `workdir`
    fn align(&self, input: &Path, workdir: &Path) -> Result<AlignerOutput>;
}

/// Locations of the external executables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub clustalw: PathBuf,
    pub muscle: PathBuf,
    pub fasttree: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        if cfg!(windows) {
            ToolPaths {
                clustalw: PathBuf::from("clustalw2.exe"),
                muscle: PathBuf::from("muscle3.8.31_i86win32.exe"),
                fasttree: PathBuf::from("FastTree.exe"),
            }
        } else {
            ToolPaths {
                clustalw: PathBuf::from("clustalw2"),
                muscle: PathBuf::from("muscle3.8.31_i86linux64"),
                fasttree: PathBuf::from("FastTree"),
            }
        }
    }
}

pub fn make_aligner(algorithm: Algorithm, tools: &ToolPaths) -> Box<dyn Aligner> {
    match algorithm {
        Algorithm::ClustalW => Box::new(ClustalW::new(&tools.clustalw)),
        Algorithm::Muscle => Box::new(Muscle::new(&tools.muscle, &tools.fasttree)),
    }
}

#[derive(Debug, Clone)]
pub struct AlignmentRun {
    pub algorithm: Algorithm,
    pub output: AlignerOutput,
    /// Re-indented guide tree, also written back over the tree file
    pub guide_tree: Option<String>,
    pub elapsed: Duration,
}

/// Run an aligner and reformat whatever guide tree it produced.
pub fn run_alignment(
    aligner: &dyn Aligner,
    input: &Path,
    workdir: &Path,
    formatter: &NewickFormatter,
) -> Result<AlignmentRun> {
    let start = Instant::now();
    info!("Running {} on {input:?}", aligner.algorithm());

    let output = aligner.align(input, workdir)?;

    let guide_tree = match &output.guide_tree_file {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            let formatted = formatter.format(&raw)?;
            fs::write(path, &formatted)?;
            info!("Guide tree reformatted in place: {path:?}");
            Some(formatted)
        }
        None => {
            warn!("{} produced no guide tree", aligner.algorithm());
            None
        }
    };

    let elapsed = start.elapsed();
    info!(
        "{} aligned {} sequences x {} columns in {:.2} ms",
        aligner.algorithm(),
        output.alignment.len(),
        output.alignment.width(),
        elapsed.as_secs_f64() * 1000.0
    );

    Ok(AlignmentRun {
        algorithm: aligner.algorithm(),
        output,
        guide_tree,
        elapsed,
    })
}

/// Check user-supplied FASTA text before handing it to an aligner.
///
/// Returns the number of sequences.
pub fn validate_fasta_input(content: &str) -> Result<usize> {
    let content = content.trim();
    if !content.starts_with('>') {
        return Err(MsaError::InvalidInput(
            "invalid FASTA format, sequences must start with '>'".to_string(),
        ));
    }

    let count = content.split('>').filter(|s| !s.trim().is_empty()).count();
    if count <= 1 {
        return Err(MsaError::InvalidInput(
            "only one sequence found, provide multiple sequences for alignment".to_string(),
        ));
    }
    Ok(count)
}
