//! Clustal conservation symbols (`*`, `:`, `.`) for the annotation line.

use std::collections::BTreeSet;
use crate::alignment::{Alignment, GAP};

pub const STRONG_GROUPS: [&str; 9] = [
    "STA", "NEQK", "NHQK", "NDEQ", "QHRK", "MILV", "MILF", "HY", "FYW",
];

pub const WEAK_GROUPS: [&str; 11] = [
    "CSA", "ATV", "SAG", "STNK", "STPA", "SGND", "SNDEQK", "NDEQHK", "NEQHRK", "FVLIM", "HFY",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConservationSymbol {
    Identical,
    Strong,
    Weak,
    None,
}

impl ConservationSymbol {
    pub fn as_char(self) -> char {
        match self {
            ConservationSymbol::Identical => '*',
            ConservationSymbol::Strong => ':',
            ConservationSymbol::Weak => '.',
            ConservationSymbol::None => ' ',
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SymbolClassifier<'a> {
    strong: &'a [&'a str],
    weak: &'a [&'a str],
}

impl Default for SymbolClassifier<'static> {
    fn default() -> Self {
        SymbolClassifier {
            strong: &STRONG_GROUPS,
            weak: &WEAK_GROUPS,
        }
    }
}

impl<'a> SymbolClassifier<'a> {
    pub fn with_groups(strong: &'a [&'a str], weak: &'a [&'a str]) -> Self {
        SymbolClassifier { strong, weak }
    }

    /// Classify one column: gaps removed, case folded, then set membership.
    ///
    /// A column of only gaps leaves an empty set, which is a subset of every
    /// strong group and therefore classifies as `Strong`.
    pub fn classify(&self, column: &[char]) -> ConservationSymbol {
        let residues: BTreeSet<char> = column
            .iter()
            .filter(|&&c| c != GAP)
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let within = |group: &&str| residues.iter().all(|&r| group.contains(r));

        if residues.len() == 1 {
            ConservationSymbol::Identical
        } else if self.strong.iter().any(within) {
            ConservationSymbol::Strong
        } else if self.weak.iter().any(within) {
            ConservationSymbol::Weak
        } else {
            ConservationSymbol::None
        }
    }

    pub fn classify_alignment(&self, alignment: &Alignment) -> Vec<ConservationSymbol> {
        alignment
            .columns()
            .iter()
            .map(|column| self.classify(column))
            .collect()
    }
}

pub fn conservation_symbols(alignment: &Alignment) -> Vec<ConservationSymbol> {
    SymbolClassifier::default().classify_alignment(alignment)
}

pub fn symbols_to_string(symbols: &[ConservationSymbol]) -> String {
    symbols.iter().map(|s| s.as_char()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(s: &str) -> ConservationSymbol {
        SymbolClassifier::default().classify(&s.chars().collect::<Vec<_>>())
    }

    #[test]
    fn test_fully_conserved_column() {
        assert_eq!(classify("AAAAA"), ConservationSymbol::Identical);
    }

    #[test]
    fn test_gaps_and_case_are_ignored() {
        assert_eq!(classify("A-a-A"), ConservationSymbol::Identical);
    }

    #[test]
    fn test_strong_group_column() {
        assert_eq!(classify("STSAT"), ConservationSymbol::Strong);
        assert_eq!(classify("FYW"), ConservationSymbol::Strong);
    }

    #[test]
    fn test_weak_group_column() {
        assert_eq!(classify("CSA"), ConservationSymbol::Weak);
        assert_eq!(classify("ST-P"), ConservationSymbol::Weak);
    }

    #[test]
    fn test_unrelated_column() {
        assert_eq!(classify("AWD"), ConservationSymbol::None);
    }

    #[test]
    fn test_all_gap_column_is_strong() {
        assert_eq!(classify("---"), ConservationSymbol::Strong);
    }

    #[test]
    fn test_symbols_to_string() {
        let symbols = [
            ConservationSymbol::Identical,
            ConservationSymbol::Strong,
            ConservationSymbol::Weak,
            ConservationSymbol::None,
        ];
        assert_eq!(symbols_to_string(&symbols), "*:. ");
    }
}
