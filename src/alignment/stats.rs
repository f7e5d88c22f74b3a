use crate::alignment::record::{Alignment, GAP};

/// Summary figures shown on the evaluation tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentStats {
    pub total_sequences: usize,
    pub total_length: usize,
    pub gap_count: usize,
}

impl AlignmentStats {
    pub fn from_alignment(alignment: &Alignment) -> Self {
        let gap_count = alignment
            .records()
            .iter()
            .map(|r| r.sequence.chars().filter(|&c| c == GAP).count())
            .sum();

        AlignmentStats {
            total_sequences: alignment.len(),
            total_length: alignment.width(),
            gap_count,
        }
    }

    /// Share of all cells that are gaps, as a percentage
    pub fn gap_percentage(&self) -> f64 {
        let cells = self.total_sequences * self.total_length;
        if cells == 0 {
            return 0.0;
        }
        (self.gap_count as f64 / cells as f64) * 100.0
    }
}
