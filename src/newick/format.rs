use log::{debug, warn};
use crate::error::{MsaError, Result};

const INDENT_STEP: i64 = 2;

/// Re-indents Newick text one character at a time.
///
/// Nothing but whitespace is added; labels, branch lengths and the trailing
/// `;` pass through untouched. With `strict` set, unbalanced parentheses are
/// reported instead of being formatted with a clamped indent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewickFormatter {
    pub strict: bool,
}

impl NewickFormatter {
    pub fn new(strict: bool) -> Self {
        NewickFormatter { strict }
    }

    pub fn format(&self, newick: &str) -> Result<String> {
        let (formatted, imbalance) = reindent(newick);

        if let Some(position) = imbalance {
            if self.strict {
                return Err(MsaError::UnbalancedNewick { position });
            }
            warn!("Guide tree has an unbalanced parenthesis at position {position}");
        }

        debug!("Formatted Newick text: {} -> {} bytes", newick.len(), formatted.len());
        Ok(formatted)
    }
}

/// Permissive formatting; never fails
pub fn format_newick(newick: &str) -> String {
    reindent(newick).0
}

/// Returns the re-indented text and the byte offset of the first unmatched
/// `)`, or failing that of the innermost unclosed `(`.
fn reindent(newick: &str) -> (String, Option<usize>) {
    let mut formatted = String::with_capacity(newick.len() * 2);
    let mut indent: i64 = 0;
    let mut open_positions: Vec<usize> = Vec::new();
    let mut unmatched_close = None;

    for (position, c) in newick.char_indices() {
        match c {
            '(' => {
                open_positions.push(position);
                formatted.push_str("(\n");
                push_spaces(&mut formatted, indent + INDENT_STEP);
                indent += INDENT_STEP;
            }
            ',' => {
                formatted.push_str(",\n");
                push_spaces(&mut formatted, indent);
            }
            ')' => {
                if open_positions.pop().is_none() && unmatched_close.is_none() {
                    unmatched_close = Some(position);
                }
                indent -= INDENT_STEP;
                formatted.push('\n');
                push_spaces(&mut formatted, indent);
                formatted.push(')');
            }
            _ => formatted.push(c),
        }
    }

    let imbalance = unmatched_close.or_else(|| open_positions.last().copied());
    (formatted, imbalance)
}

// A negative indent emits no spaces
fn push_spaces(buf: &mut String, count: i64) {
    for _ in 0..count.max(0) {
        buf.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_whitespace(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_format_simple_tree() {
        let formatted = format_newick("(A:0.1,(B:0.2,C:0.3):0.4);");
        let expected = "(\n  A:0.1,\n  (\n    B:0.2,\n    C:0.3\n  ):0.4\n);";
        assert_eq!(formatted, expected);
    }

    #[test]
    fn test_format_preserves_content() {
        let inputs = [
            "(A,B);",
            "((seq1:0.12,seq2:0.08):0.5,(seq3:1.0,(seq4:0.3,seq5:0.2):0.1):0.25,seq6:0.7);",
            "A;",
            "",
        ];
        for input in inputs {
            assert_eq!(strip_whitespace(&format_newick(input)), input);
        }
    }

    #[test]
    fn test_permissive_handles_unbalanced_input() {
        let formatted = format_newick("A,B));");
        assert_eq!(strip_whitespace(&formatted), "A,B));");
        assert_eq!(formatted, "A,\nB\n)\n);");
    }

    #[test]
    fn test_formatter_matches_permissive_output_when_balanced() {
        let input = "((A,B),C);";
        let formatter = NewickFormatter::new(true);
        assert_eq!(formatter.format(input).unwrap(), format_newick(input));
    }

    #[test]
    fn test_strict_rejects_unmatched_close() {
        let err = NewickFormatter::new(true).format("(A,B));").unwrap_err();
        assert!(matches!(err, MsaError::UnbalancedNewick { position: 5 }));
    }

    #[test]
    fn test_strict_rejects_unclosed_open() {
        let err = NewickFormatter::new(true).format("((A,B);").unwrap_err();
        assert!(matches!(err, MsaError::UnbalancedNewick { position: 0 }));
    }

    #[test]
    fn test_lenient_formatter_accepts_unbalanced() {
        let formatted = NewickFormatter::default().format("(A,B));").unwrap();
        assert_eq!(formatted, format_newick("(A,B));"));
    }
}
