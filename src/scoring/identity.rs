use log::{debug, trace};
use crate::alignment::{Alignment, GAP};

/// Percent identity of two aligned sequences, ignoring gapped positions.
///
/// A position is compared only when neither sequence has a gap there.
/// Comparison is case-sensitive. Returns 0.0 when no position qualifies,
/// otherwise the percentage rounded to two decimals.
pub fn percent_identity(seq1: &str, seq2: &str) -> f64 {
    let mut matches = 0usize;
    let mut total = 0usize;

    for (c1, c2) in seq1.chars().zip(seq2.chars()) {
        if c1 != GAP && c2 != GAP {
            total += 1;
            if c1 == c2 {
                matches += 1;
            }
        }
    }

    if total == 0 {
        return 0.0;
    }

    round2((matches as f64 / total as f64) * 100.0)
}

// Halves go to the even neighbour: 3.125 -> 3.12, 40.625 -> 40.62
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdentityMatrix {
    pub ids: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// Build the symmetric N x N percent-identity matrix of an alignment
pub fn identity_matrix(alignment: &Alignment) -> IdentityMatrix {
    let records = alignment.records();
    let n = records.len();
    let mut values = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in i..n {
            let identity = percent_identity(&records[i].sequence, &records[j].sequence);
            trace!("Identity {} vs {}: {identity:.2}", records[i].id, records[j].id);
            values[i][j] = identity;
            values[j][i] = identity;
        }
    }

    debug!("Computed {n}x{n} identity matrix");
    IdentityMatrix {
        ids: alignment.ids(),
        values,
    }
}

impl IdentityMatrix {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Rows as shown on screen: name truncated to 10, then one value per column
    pub fn display_rows(&self) -> Vec<String> {
        self.ids
            .iter()
            .zip(&self.values)
            .map(|(id, row)| {
                let mut line = format!("{id:<10.10}");
                for value in row {
                    line.push_str(&format!("{value:>10.1}"));
                }
                line
            })
            .collect()
    }

    /// The exported `identity_matrix.txt` contents
    pub fn to_table(&self) -> String {
        let mut table = String::from("Sequence Identity Matrix (%)\n\n");
        table.push_str("Sequence");
        table.push_str(&" ".repeat(10));
        for i in 1..=self.len() {
            table.push_str(&format!("{i:>10}"));
        }
        table.push('\n');

        for row in self.display_rows() {
            table.push_str(&row);
            table.push('\n');
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::SeqRecord;

    fn sample_alignment() -> Alignment {
        Alignment::new(vec![
            SeqRecord::new("human_protein_long_name", "MKV-LAGG"),
            SeqRecord::new("mouse", "MKVQLAG-"),
            SeqRecord::new("fly", "MRVQIS--"),
            SeqRecord::new("empty", "--------"),
        ])
        .unwrap()
    }

    #[test]
    fn test_percent_identity_ignores_gaps() {
        assert_eq!(percent_identity("AC-GT", "AG-GA"), 50.0);
    }

    #[test]
    fn test_percent_identity_no_overlap_is_zero() {
        assert_eq!(percent_identity("AC--", "--GT"), 0.0);
        assert_eq!(percent_identity("", ""), 0.0);
    }

    #[test]
    fn test_percent_identity_is_case_sensitive() {
        assert_eq!(percent_identity("ACGT", "acgt"), 0.0);
    }

    #[test]
    fn test_percent_identity_rounds_to_two_decimals() {
        // 1 of 3 positions match
        assert_eq!(percent_identity("ABC", "AXY"), 33.33);
        assert_eq!(percent_identity("ABC", "ABY"), 66.67);
    }

    #[test]
    fn test_percent_identity_rounds_halves_to_even() {
        let all_a = "A".repeat(32);
        let one_match = format!("A{}", "C".repeat(31));
        let thirteen_matches = format!("{}{}", "A".repeat(13), "C".repeat(19));

        assert_eq!(percent_identity(&all_a, &one_match), 3.12);
        assert_eq!(percent_identity(&all_a, &thirteen_matches), 40.62);
        // 3 of 8 -> 37.5 exactly, no rounding needed
        assert_eq!(percent_identity("AAAAAAAA", "AAACCCCC"), 37.5);
    }

    #[test]
    fn test_self_identity() {
        assert_eq!(percent_identity("MK-V", "MK-V"), 100.0);
        assert_eq!(percent_identity("----", "----"), 0.0);
    }

    #[test]
    fn test_identity_matrix_is_symmetric_and_bounded() {
        let matrix = identity_matrix(&sample_alignment());
        assert_eq!(matrix.len(), 4);

        for i in 0..matrix.len() {
            for j in 0..matrix.len() {
                let value = matrix.get(i, j).unwrap();
                assert_eq!(value, matrix.get(j, i).unwrap());
                assert!((0.0..=100.0).contains(&value));
            }
        }

        assert_eq!(matrix.get(0, 0), Some(100.0));
        assert_eq!(matrix.get(3, 3), Some(0.0));
        // MKV-LAG vs MKVQLAG over 6 shared positions, all equal
        assert_eq!(matrix.get(0, 1), Some(100.0));
        // MKVQLA vs MRVQIS: M, V, Q match out of 6
        assert_eq!(matrix.get(1, 2), Some(50.0));
    }

    #[test]
    fn test_identity_table_format() {
        let alignment = Alignment::new(vec![
            SeqRecord::new("averyveryverylongname", "AC"),
            SeqRecord::new("b", "AG"),
        ])
        .unwrap();
        let table = identity_matrix(&alignment).to_table();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Sequence Identity Matrix (%)");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], format!("Sequence{}{:>10}{:>10}", " ".repeat(10), 1, 2));
        assert_eq!(lines[3], format!("averyveryv{:>10}{:>10}", "100.0", "50.0"));
        assert_eq!(lines[4], format!("b         {:>10}{:>10}", "50.0", "100.0"));
    }
}
