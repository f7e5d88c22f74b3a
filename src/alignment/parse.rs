//! Readers for the alignment formats the supported aligners emit.
//!
//! ClustalW writes Clustal blocks, MUSCLE writes aligned FASTA. Both can be
//! read from plain or gzip-compressed files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use flate2::read::GzDecoder;
use log::{debug, info, warn};

use crate::alignment::record::{Alignment, SeqRecord};
use crate::error::{MsaError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentFormat {
    Fasta,
    Clustal,
}

/// Guess the format from the first non-blank line
pub fn detect_format(text: &str) -> Option<AlignmentFormat> {
    let first = text.lines().find(|l| !l.trim().is_empty())?.trim_start();
    if first.starts_with('>') {
        Some(AlignmentFormat::Fasta)
    } else if first.starts_with("CLUSTAL") || first.starts_with("MUSCLE") {
        Some(AlignmentFormat::Clustal)
    } else {
        None
    }
}

/// Parse FASTA records without checking lengths.
///
/// The id is the header text up to the first whitespace.
pub fn parse_fasta_records(text: &str) -> Result<Vec<SeqRecord>> {
    let mut records: Vec<SeqRecord> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            let id = header.split_whitespace().next().unwrap_or("").to_string();
            records.push(SeqRecord::new(id, String::new()));
        } else if let Some(current) = records.last_mut() {
            current.sequence.extend(line.chars().filter(|c| !c.is_whitespace()));
        } else {
            return Err(MsaError::Parse {
                line: line_no + 1,
                message: "sequence data before the first '>' header".to_string(),
            });
        }
    }

    Ok(records)
}

pub fn parse_fasta(text: &str) -> Result<Alignment> {
    let records = parse_fasta_records(text)?;
    debug!("Parsed {} FASTA records", records.len());
    Alignment::new(records)
}

/// Parse Clustal blocks, joining the pieces of each id in first-seen order.
pub fn parse_clustal(text: &str) -> Result<Alignment> {
    let mut lines = text.lines().enumerate();
    match lines.by_ref().find(|(_, l)| !l.trim().is_empty()) {
        Some((_, header)) if header.starts_with("CLUSTAL") || header.starts_with("MUSCLE") => {}
        Some((line_no, _)) => {
            return Err(MsaError::Parse {
                line: line_no + 1,
                message: "missing CLUSTAL header".to_string(),
            })
        }
        None => return Err(MsaError::EmptyAlignment),
    }

    let mut records: Vec<SeqRecord> = Vec::new();

    for (line_no, line) in lines {
        // Blank separators and the conservation lines under each block
        if line.trim().is_empty() || line.starts_with(char::is_whitespace) {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(id), Some(chunk)) = (fields.next(), fields.next()) else {
            return Err(MsaError::Parse {
                line: line_no + 1,
                message: format!("expected '<id> <sequence>' but found '{line}'"),
            });
        };
        if let Some(extra) = fields.next() {
            if extra.parse::<usize>().is_err() {
                warn!("Ignoring unexpected trailing field '{extra}' on line {}", line_no + 1);
            }
        }

        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => record.sequence.push_str(chunk),
            None => records.push(SeqRecord::new(id, chunk)),
        }
    }

    debug!("Parsed {} Clustal records", records.len());
    Alignment::new(records)
}

pub fn parse_alignment(text: &str) -> Result<Alignment> {
    match detect_format(text) {
        Some(AlignmentFormat::Fasta) => parse_fasta(text),
        Some(AlignmentFormat::Clustal) => parse_clustal(text),
        None if text.trim().is_empty() => Err(MsaError::EmptyAlignment),
        None => Err(MsaError::Parse {
            line: 1,
            message: "unrecognised alignment format (expected FASTA or CLUSTAL)".to_string(),
        }),
    }
}

/// Read a whole text file, gunzipping it when the name ends in `.gz`
pub fn read_text(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut content = String::new();

    if path.extension().is_some_and(|ext| ext == "gz") {
        debug!("Decompressing {path:?}");
        let mut reader = BufReader::new(GzDecoder::new(file));
        reader.read_to_string(&mut content)?;
    } else {
        let mut reader = BufReader::new(file);
        reader.read_to_string(&mut content)?;
    }

    Ok(content)
}

pub fn read_alignment(path: &Path) -> Result<Alignment> {
    info!("Reading alignment from {path:?}");
    let content = read_text(path)?;
    parse_alignment(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::tempdir;

    const CLUSTAL: &str = "CLUSTAL 2.1 multiple sequence alignment


sp|P1|A      MKV-LA 5
sp|P2|B      MKVQLA 6
             ***.**

sp|P1|A      GG 7
sp|P2|B      G- 7
             *
";

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format("\n>a\nAC\n"), Some(AlignmentFormat::Fasta));
        assert_eq!(detect_format(CLUSTAL), Some(AlignmentFormat::Clustal));
        assert_eq!(detect_format("MUSCLE (3.8) multiple sequence alignment"), Some(AlignmentFormat::Clustal));
        assert_eq!(detect_format("ACGT"), None);
    }

    #[test]
    fn test_parse_fasta_multiline() {
        let alignment = parse_fasta(">seq1 first protein\nMKV-\nLA\n\n>seq2\nMKVQLA\n").unwrap();
        assert_eq!(alignment.ids(), vec!["seq1", "seq2"]);
        assert_eq!(alignment.records()[0].sequence, "MKV-LA");
        assert_eq!(alignment.width(), 6);
    }

    #[test]
    fn test_parse_fasta_rejects_orphan_sequence() {
        let err = parse_fasta("MKV\n>a\nMKV\n").unwrap_err();
        assert!(matches!(err, MsaError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_parse_fasta_rejects_ragged_alignment() {
        let err = parse_fasta(">a\nMKV\n>b\nMK\n").unwrap_err();
        assert!(matches!(err, MsaError::LengthMismatch { .. }));
    }

    #[test]
    fn test_parse_clustal_joins_blocks() {
        let alignment = parse_clustal(CLUSTAL).unwrap();
        assert_eq!(alignment.ids(), vec!["sp|P1|A", "sp|P2|B"]);
        assert_eq!(alignment.records()[0].sequence, "MKV-LAGG");
        assert_eq!(alignment.records()[1].sequence, "MKVQLAG-");
    }

    #[test]
    fn test_parse_clustal_requires_header() {
        let err = parse_clustal("seq1 MKV\n").unwrap_err();
        assert!(matches!(err, MsaError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_read_alignment_gzip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aln.fasta.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b">a\nAC-D\n>b\nACED\n").unwrap();
        encoder.finish().unwrap();

        let alignment = read_alignment(&path).unwrap();
        assert_eq!(alignment.len(), 2);
        assert_eq!(alignment.width(), 4);
    }

    #[test]
    fn test_parse_alignment_unknown_format() {
        assert!(matches!(parse_alignment("hello"), Err(MsaError::Parse { .. })));
        assert!(matches!(parse_alignment("  \n"), Err(MsaError::EmptyAlignment)));
    }
}
