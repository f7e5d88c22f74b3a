//! Turns command line options into a finished `Report`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use log::info;

use crate::aligner::{make_aligner, run_alignment, validate_fasta_input};
use crate::alignment::{read_alignment, read_text};
use crate::cli::Cli;
use crate::error::{MsaError, Result};
use crate::newick::NewickFormatter;
use crate::report::Report;

/// Name the input is copied to inside the work directory
pub const WORK_INPUT: &str = "input_sequences.fasta";

/// Four globins shipped with the binary for `--example`
pub const EXAMPLE_FASTA: &str = include_str!("../data/example_sequences.fasta");
pub const EXAMPLE_NAME: &str = "example_sequences.fasta";

/// The input file to work from; `--example` writes the bundled FASTA into `workdir`.
pub fn resolve_input(cli: &Cli, workdir: &Path) -> Result<PathBuf> {
    if cli.example {
        let path = workdir.join(EXAMPLE_NAME);
        fs::write(&path, EXAMPLE_FASTA)?;
        info!("Using bundled example sequences");
        return Ok(path);
    }
    cli.input
        .clone()
        .ok_or_else(|| MsaError::InvalidInput("no input file given".to_string()))
}

/// Either decode an existing alignment or run the selected aligner inside `workdir`.
pub fn load_report(cli: &Cli, input: &Path, workdir: &Path) -> Result<Report> {
    let formatter = NewickFormatter::new(cli.strict_newick);

    if cli.aligned {
        let alignment = read_alignment(input)?;
        let guide_tree = match &cli.tree {
            Some(path) => Some(formatter.format(&read_text(path)?)?),
            None => None,
        };
        return Ok(Report::build(alignment, None, guide_tree, Duration::ZERO));
    }

    let content = read_text(input)?;
    let count = validate_fasta_input(&content)?;
    info!("Loaded {count} sequences from {input:?}");

    // ClustalW writes its .dnd next to the input, so the aligner only ever sees a copy
    let work_input = workdir.join(WORK_INPUT);
    fs::write(&work_input, &content)?;

    let aligner = make_aligner(cli.algorithm, &cli.tool_paths());
    let run = run_alignment(aligner.as_ref(), &work_input, workdir, &formatter)?;
    Ok(Report::from_run(run))
}
