//! Writes the result files offered on the Result Files tab.

use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, info};

use crate::error::Result;
use crate::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Input,
    Aligned,
    ColoredAlignment,
    IdentityMatrix,
    Conservation,
    GuideTree,
}

impl ResultKind {
    pub fn description(self) -> &'static str {
        match self {
            ResultKind::Input => "Input File",
            ResultKind::Aligned => "Aligned Sequences",
            ResultKind::ColoredAlignment => "Colored Alignment",
            ResultKind::IdentityMatrix => "Identity Matrix",
            ResultKind::Conservation => "Conservation Scores",
            ResultKind::GuideTree => "Guide Tree",
        }
    }
}

/// A file the exporter will produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFile {
    pub kind: ResultKind,
    pub file_name: String,
}

/// The files `write_results` produces for this report, in display order
pub fn result_files(report: &Report, input: Option<&Path>) -> Vec<ResultFile> {
    let tag = report.file_tag();
    let mut files = Vec::new();

    if let Some(input) = input {
        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "input_sequences.fasta".to_string());
        files.push(ResultFile {
            kind: ResultKind::Input,
            file_name,
        });
    }
    files.push(ResultFile {
        kind: ResultKind::Aligned,
        file_name: format!("aligned_{tag}.aln"),
    });
    files.push(ResultFile {
        kind: ResultKind::ColoredAlignment,
        file_name: format!("aligned_{tag}.html"),
    });
    files.push(ResultFile {
        kind: ResultKind::IdentityMatrix,
        file_name: "identity_matrix.txt".to_string(),
    });
    files.push(ResultFile {
        kind: ResultKind::Conservation,
        file_name: format!("conservation_{tag}.tsv"),
    });
    if report.guide_tree.is_some() {
        files.push(ResultFile {
            kind: ResultKind::GuideTree,
            file_name: format!("guidetree_{tag}.dnd"),
        });
    }
    files
}

/// Position, score and symbol per column, tab separated
pub fn conservation_table(report: &Report) -> String {
    let mut table = String::from("position\tscore\tsymbol\n");
    for (i, (score, symbol)) in report.scores.iter().zip(&report.symbols).enumerate() {
        table.push_str(&format!("{}\t{:.4}\t{}\n", i + 1, score, symbol.as_char()));
    }
    table
}

pub fn write_results(dir: &Path, report: &Report, input: Option<&Path>) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    for file in result_files(report, input) {
        let path = dir.join(&file.file_name);
        match file.kind {
            ResultKind::Input => {
                if let Some(input) = input {
                    fs::copy(input, &path)?;
                }
            }
            ResultKind::Aligned => fs::write(&path, &report.plain)?,
            ResultKind::ColoredAlignment => fs::write(&path, &report.html)?,
            ResultKind::IdentityMatrix => fs::write(&path, report.identity.to_table())?,
            ResultKind::Conservation => fs::write(&path, conservation_table(report))?,
            ResultKind::GuideTree => {
                if let Some(tree) = &report.guide_tree {
                    fs::write(&path, tree)?;
                }
            }
        }
        debug!("Wrote {} to {path:?}", file.kind.description());
        written.push(path);
    }

    info!("Exported {} result files to {dir:?}", written.len());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;
    use crate::aligner::Algorithm;
    use crate::alignment::{Alignment, SeqRecord};

    fn report(tree: Option<&str>) -> Report {
        let alignment = Alignment::new(vec![
            SeqRecord::new("a", "MK-"),
            SeqRecord::new("b", "MKV"),
        ])
        .unwrap();
        Report::build(alignment, Some(Algorithm::ClustalW), tree.map(String::from), Duration::ZERO)
    }

    #[test]
    fn test_result_files_without_tree_or_input() {
        let names: Vec<String> = result_files(&report(None), None)
            .into_iter()
            .map(|f| f.file_name)
            .collect();
        assert_eq!(
            names,
            vec![
                "aligned_clustal.aln",
                "aligned_clustal.html",
                "identity_matrix.txt",
                "conservation_clustal.tsv",
            ]
        );
    }

    #[test]
    fn test_conservation_table() {
        let table = conservation_table(&report(None));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "position\tscore\tsymbol");
        assert_eq!(lines[1], "1\t1.0000\t*");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_write_results() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("my_sequences.fasta");
        fs::write(&input, ">a\nMK\n>b\nMKV\n").unwrap();
        let out = dir.path().join("results");

        let report = report(Some("(\n  a,\n  b\n);"));
        let written = write_results(&out, &report, Some(&input)).unwrap();

        assert_eq!(written.len(), 6);
        for path in &written {
            assert!(path.exists(), "{path:?} missing");
        }
        assert_eq!(fs::read_to_string(out.join("my_sequences.fasta")).unwrap(), ">a\nMK\n>b\nMKV\n");
        assert_eq!(fs::read_to_string(out.join("aligned_clustal.aln")).unwrap(), report.plain);
        assert_eq!(fs::read_to_string(out.join("guidetree_clustal.dnd")).unwrap(), "(\n  a,\n  b\n);");
        assert!(fs::read_to_string(out.join("identity_matrix.txt"))
            .unwrap()
            .starts_with("Sequence Identity Matrix (%)"));
    }
}
