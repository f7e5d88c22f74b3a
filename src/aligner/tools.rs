use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use log::{debug, info, warn};

use crate::aligner::{Aligner, AlignerOutput, Algorithm};
use crate::alignment::{parse_alignment, parse_clustal, read_text};
use crate::error::{MsaError, Result};

fn run_tool(program: &Path, args: &[String]) -> Result<Output> {
    let tool = program.display().to_string();
    debug!("Running '{} {}'", tool, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| MsaError::ToolNotFound {
            tool: tool.clone(),
            source,
        })?;

    if !output.status.success() {
        debug!("{}", String::from_utf8_lossy(&output.stdout));
        return Err(MsaError::ToolFailed {
            tool,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}

fn output_path(input: &Path, workdir: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "alignment".to_string());
    workdir.join(format!("{stem}.{extension}"))
}

fn non_empty_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file() && m.len() > 0).unwrap_or(false)
}

/// ClustalW: writes Clustal text and drops its guide tree beside the input
#[derive(Debug, Clone)]
pub struct ClustalW {
    executable: PathBuf,
}

impl ClustalW {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        ClustalW {
            executable: executable.into(),
        }
    }
}

impl Aligner for ClustalW {
    fn algorithm(&self) -> Algorithm {
        Algorithm::ClustalW
    }

    fn align(&self, input: &Path, workdir: &Path) -> Result<AlignerOutput> {
        let alignment_file = output_path(input, workdir, "aln");
        let guide_tree_file = input.with_extension("dnd");
        info!("ClustalW alignment file: {alignment_file:?}");
        debug!("ClustalW guide tree expected at {guide_tree_file:?}");

        run_tool(
            &self.executable,
            &[
                format!("-INFILE={}", input.display()),
                format!("-OUTFILE={}", alignment_file.display()),
            ],
        )?;

        if !alignment_file.is_file() {
            return Err(MsaError::MissingOutput(alignment_file));
        }
        let alignment = parse_clustal(&read_text(&alignment_file)?)?;

        let guide_tree_file = if non_empty_file(&guide_tree_file) {
            Some(guide_tree_file)
        } else {
            warn!("Guide tree file was not created or is empty");
            None
        };

        Ok(AlignerOutput {
            alignment,
            alignment_file,
            guide_tree_file,
        })
    }
}

/// MUSCLE for the alignment, FastTree for the tree
#[derive(Debug, Clone)]
pub struct Muscle {
    executable: PathBuf,
    fasttree: PathBuf,
}

impl Muscle {
    pub fn new(executable: impl Into<PathBuf>, fasttree: impl Into<PathBuf>) -> Self {
        Muscle {
            executable: executable.into(),
            fasttree: fasttree.into(),
        }
    }
}

impl Aligner for Muscle {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Muscle
    }

    fn align(&self, input: &Path, workdir: &Path) -> Result<AlignerOutput> {
        let alignment_file = output_path(input, workdir, "aln");
        info!("MUSCLE alignment file: {alignment_file:?}");

        run_tool(
            &self.executable,
            &[
                "-in".to_string(),
                input.display().to_string(),
                "-out".to_string(),
                alignment_file.display().to_string(),
            ],
        )?;

        if !alignment_file.is_file() {
            return Err(MsaError::MissingOutput(alignment_file));
        }
        let alignment = parse_alignment(&read_text(&alignment_file)?)?;

        // A tree failure still leaves a usable alignment
        let guide_tree_file = match build_tree(&self.fasttree, &alignment_file) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Error generating guide tree: {e}");
                None
            }
        };

        Ok(AlignerOutput {
            alignment,
            alignment_file,
            guide_tree_file,
        })
    }
}

/// Infer a tree from an aligned FASTA file with FastTree
pub fn build_tree(fasttree: &Path, alignment_file: &Path) -> Result<PathBuf> {
    let tree_file = alignment_file.with_extension("dnd");
    info!("FastTree guide tree file: {tree_file:?}");

    run_tool(
        fasttree,
        &[
            "-out".to_string(),
            tree_file.display().to_string(),
            alignment_file.display().to_string(),
        ],
    )?;

    if !non_empty_file(&tree_file) {
        return Err(MsaError::MissingOutput(tree_file));
    }
    Ok(tree_file)
}
