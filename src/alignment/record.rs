use log::{debug, error};
use crate::error::{MsaError, Result};

/// Gap symbol inserted by the aligners
pub const GAP: char = '-';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqRecord {
    pub id: String,
    pub sequence: String,
}

impl SeqRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        SeqRecord {
            id: id.into(),
            sequence: sequence.into(),
        }
    }

    /// Number of non-gap characters
    pub fn residue_count(&self) -> usize {
        self.sequence.chars().filter(|&c| c != GAP).count()
    }
}

/// An ordered set of equal-length aligned sequences.
///
/// Construction is the only place the equal-length invariant is checked;
/// every analysis downstream relies on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    records: Vec<SeqRecord>,
    width: usize,
}

impl Alignment {
    pub fn new(records: Vec<SeqRecord>) -> Result<Alignment> {
        let Some(first) = records.first() else {
            error!("Refusing to build an alignment with no sequences");
            return Err(MsaError::EmptyAlignment);
        };
        let width = first.sequence.chars().count();

        for record in &records {
            let found = record.sequence.chars().count();
            if found != width {
                error!("Sequence {} has length {found}, expected {width}", record.id);
                return Err(MsaError::LengthMismatch {
                    id: record.id.clone(),
                    expected: width,
                    found,
                });
            }
        }

        debug!("Built alignment of {} sequences x {} columns", records.len(), width);
        Ok(Alignment { records, width })
    }

    pub fn records(&self) -> &[SeqRecord] {
        &self.records
    }

    /// Number of sequences (N)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of columns (L)
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    /// Characters of column `index` in record order, or `None` past the end
    pub fn column(&self, index: usize) -> Option<Vec<char>> {
        if index >= self.width {
            return None;
        }
        Some(
            self.records
                .iter()
                .filter_map(|r| r.sequence.chars().nth(index))
                .collect(),
        )
    }

    /// All columns at once, avoiding repeated `nth` walks over every record
    pub fn columns(&self) -> Vec<Vec<char>> {
        let mut columns = vec![Vec::with_capacity(self.records.len()); self.width];
        for record in &self.records {
            for (i, c) in record.sequence.chars().enumerate() {
                columns[i].push(c);
            }
        }
        columns
    }
}
