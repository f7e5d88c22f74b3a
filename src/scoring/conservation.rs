//! Per-column conservation score used by the heatmap.
//!
//! Each column scores `min(1, basic + bonus - gap_penalty)` where `basic` is
//! the share of the most frequent character (gaps included), `bonus` rewards
//! residues sharing a biochemical group and `gap_penalty` is `0.2 * gaps / N`.

use std::collections::HashMap;
use log::debug;
use crate::alignment::{Alignment, GAP};

/// A named set of residues with similar side-chain chemistry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidueGroup {
    pub name: &'static str,
    pub members: &'static str,
}

impl ResidueGroup {
    pub fn contains(&self, residue: char) -> bool {
        self.members.contains(residue)
    }
}

pub const BIOCHEMICAL_GROUPS: [ResidueGroup; 5] = [
    ResidueGroup { name: "hydrophobic", members: "AILMFWYV" },
    ResidueGroup { name: "polar", members: "STNQ" },
    ResidueGroup { name: "positive", members: "RHK" },
    ResidueGroup { name: "negative", members: "DE" },
    ResidueGroup { name: "special", members: "CGP" },
];

const GROUP_BONUS_WEIGHT: f64 = 0.1;
const GAP_PENALTY_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, Copy)]
pub struct ConservationScorer<'a> {
    groups: &'a [ResidueGroup],
}

impl Default for ConservationScorer<'static> {
    fn default() -> Self {
        ConservationScorer { groups: &BIOCHEMICAL_GROUPS }
    }
}

impl<'a> ConservationScorer<'a> {
    pub fn with_groups(groups: &'a [ResidueGroup]) -> Self {
        ConservationScorer { groups }
    }

    /// Score a single column. An empty column scores 0.0.
    pub fn score_column(&self, column: &[char]) -> f64 {
        if column.is_empty() {
            return 0.0;
        }
        let n = column.len() as f64;

        let mut counts: HashMap<char, usize> = HashMap::new();
        for &c in column {
            *counts.entry(c).or_insert(0) += 1;
        }
        let most_common = counts.values().copied().max().unwrap_or(0);
        let basic_score = most_common as f64 / n;

        let mut similarity_bonus = 0.0;
        for group in self.groups {
            let group_count = column.iter().filter(|&&c| group.contains(c)).count();
            if group_count > 1 {
                similarity_bonus += GROUP_BONUS_WEIGHT * (group_count as f64 / n);
            }
        }

        let gaps = counts.get(&GAP).copied().unwrap_or(0);
        let gap_penalty = GAP_PENALTY_WEIGHT * gaps as f64 / n;

        // Capped above only
        (basic_score + similarity_bonus - gap_penalty).min(1.0)
    }

    pub fn score(&self, alignment: &Alignment) -> Vec<f64> {
        let scores: Vec<f64> = alignment
            .columns()
            .iter()
            .map(|column| self.score_column(column))
            .collect();
        debug!("Scored conservation for {} columns", scores.len());
        scores
    }
}

pub fn column_conservation(column: &[char]) -> f64 {
    ConservationScorer::default().score_column(column)
}

pub fn conservation_scores(alignment: &Alignment) -> Vec<f64> {
    ConservationScorer::default().score(alignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::SeqRecord;

    fn col(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_gap_only_column() {
        assert!(approx(column_conservation(&col("-----")), 0.8));
        assert!(approx(column_conservation(&col("--")), 0.8));
    }

    #[test]
    fn test_identical_column_is_capped() {
        // basic 1.0 + hydrophobic bonus 0.1, capped to 1.0
        assert_eq!(column_conservation(&col("AAAAA")), 1.0);
    }

    #[test]
    fn test_group_bonus_and_gap_penalty() {
        // basic 2/5, polar 4/5 -> 0.08, gap 0.2/5 -> 0.04
        assert!(approx(column_conservation(&col("STS-T")), 0.4 + 0.08 - 0.04));
    }

    #[test]
    fn test_group_threshold_needs_two_members() {
        // each residue alone in its group: no bonus
        assert!(approx(column_conservation(&col("ASRDC")), 0.2));
        // two negatives pass the threshold
        assert!(approx(column_conservation(&col("DEKSC")), 0.2 + 0.1 * 2.0 / 5.0));
    }

    #[test]
    fn test_lowercase_residues_fall_outside_groups() {
        assert!(approx(column_conservation(&col("ai")), 0.5));
    }

    #[test]
    fn test_substitute_groups() {
        let groups = [ResidueGroup { name: "all", members: "AC" }];
        let scorer = ConservationScorer::with_groups(&groups);
        assert!(approx(scorer.score_column(&col("AC")), 0.5 + 0.1));
    }

    #[test]
    fn test_scores_are_bounded_above() {
        let alignment = Alignment::new(vec![
            SeqRecord::new("a", "AAS-W-"),
            SeqRecord::new("b", "AIT-F-"),
            SeqRecord::new("c", "AL--Y-"),
        ])
        .unwrap();
        let scores = conservation_scores(&alignment);
        assert_eq!(scores.len(), 6);
        for score in &scores {
            assert!(*score <= 1.0);
            // gaps always count toward the majority, so the penalty never
            // outweighs the basic score
            assert!(*score >= 0.0);
        }
        assert!(approx(scores[5], 0.8));
    }
}
