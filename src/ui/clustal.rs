//! Clustal-style alignment rendering: plain text, styled terminal lines and
//! colored HTML, all sharing the same block layout.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use crate::alignment::{Alignment, GAP};
use crate::scoring::{ConservationSymbol, SymbolClassifier};
use crate::ui::colors::ResiduePalette;

pub const LINE_WIDTH: usize = 60;
pub const NAME_WIDTH: usize = 15;
pub const COUNTER_WIDTH: usize = 4;

/// Non-breaking hyphen shown in place of gaps in the styled views
pub const GAP_GLYPH: char = '\u{2011}';

const HTML_STYLE: &str = r#"<style>
    .seq-char { display: inline-block; width: 1.2ch; text-align: center; margin: 0; font-size: 14.5px; }
    .conservation-char { display: inline-block; width: 1.2ch; text-align: center; margin: 0; font-size: 14.5px; }
    .sequence-block { font-size: 12px; font-family: monospace; }
</style>"#;

/// Text before the first `|`, cut to `width` characters
pub fn display_id(id: &str, width: usize) -> String {
    id.split('|').next().unwrap_or("").chars().take(width).collect()
}

/// One record's slice of a block plus its running residue count
struct BlockRow<'a> {
    id: &'a str,
    residues: &'a [char],
    count: usize,
}

struct Block<'a> {
    rows: Vec<BlockRow<'a>>,
    symbols: &'a [ConservationSymbol],
}

#[derive(Debug, Clone, Copy)]
pub struct ClustalRenderer<'a> {
    line_width: usize,
    name_width: usize,
    palette: ResiduePalette<'a>,
    classifier: SymbolClassifier<'a>,
}

impl Default for ClustalRenderer<'static> {
    fn default() -> Self {
        ClustalRenderer {
            line_width: LINE_WIDTH,
            name_width: NAME_WIDTH,
            palette: ResiduePalette::default(),
            classifier: SymbolClassifier::default(),
        }
    }
}

impl<'a> ClustalRenderer<'a> {
    pub fn new(
        line_width: usize,
        name_width: usize,
        palette: ResiduePalette<'a>,
        classifier: SymbolClassifier<'a>,
    ) -> Self {
        ClustalRenderer {
            line_width: line_width.max(1),
            name_width,
            palette,
            classifier,
        }
    }

    /// Alignment columns per block, at least 1
    pub fn line_width(&self) -> usize {
        self.line_width
    }

    pub fn name_width(&self) -> usize {
        self.name_width
    }

    fn for_each_block<'b>(
        &self,
        ids: &'b [String],
        sequences: &'b [Vec<char>],
        symbols: &'b [ConservationSymbol],
        mut visit: impl FnMut(Block<'b>),
    ) {
        let width = symbols.len();
        let mut counts = vec![0usize; sequences.len()];

        for start in (0..width).step_by(self.line_width) {
            let end = (start + self.line_width).min(width);
            let rows = ids
                .iter()
                .zip(sequences)
                .zip(counts.iter_mut())
                .map(|((id, seq), count)| {
                    let residues = &seq[start..end];
                    *count += residues.iter().filter(|&&c| c != GAP).count();
                    BlockRow {
                        id,
                        residues,
                        count: *count,
                    }
                })
                .collect();

            visit(Block {
                rows,
                symbols: &symbols[start..end],
            });
        }
    }

    fn prepare(&self, alignment: &Alignment) -> (Vec<String>, Vec<Vec<char>>, Vec<ConservationSymbol>) {
        let ids = alignment
            .records()
            .iter()
            .map(|r| display_id(&r.id, self.name_width))
            .collect();
        let sequences = alignment
            .records()
            .iter()
            .map(|r| r.sequence.chars().collect())
            .collect();
        let symbols = self.classifier.classify_alignment(alignment);
        (ids, sequences, symbols)
    }

    pub fn render_plain(&self, alignment: &Alignment) -> String {
        let (ids, sequences, symbols) = self.prepare(alignment);
        let mut output = String::from("\n");

        self.for_each_block(&ids, &sequences, &symbols, |block| {
            for row in &block.rows {
                let chunk: String = row.residues.iter().collect();
                output.push_str(&format!(
                    "{:<name$} {} {:>count$}\n",
                    row.id,
                    chunk,
                    row.count,
                    name = self.name_width,
                    count = COUNTER_WIDTH
                ));
            }
            output.push_str(&" ".repeat(self.name_width + 1));
            output.extend(block.symbols.iter().map(|s| s.as_char()));
            output.push_str("\n\n");
        });

        output
    }

    pub fn render_styled(&self, alignment: &Alignment) -> Vec<Line<'static>> {
        let (ids, sequences, symbols) = self.prepare(alignment);
        let mut lines = Vec::new();

        self.for_each_block(&ids, &sequences, &symbols, |block| {
            for row in &block.rows {
                let mut spans = Vec::with_capacity(row.residues.len() + 2);
                spans.push(Span::raw(format!("{:<name$} ", row.id, name = self.name_width)));
                for &residue in row.residues {
                    let glyph = if residue == GAP { GAP_GLYPH } else { residue };
                    spans.push(Span::styled(
                        glyph.to_string(),
                        Style::default().fg(self.palette.color(residue)),
                    ));
                }
                spans.push(Span::raw(format!(" {:>count$}", row.count, count = COUNTER_WIDTH)));
                lines.push(Line::from(spans));
            }

            let conservation: String = block.symbols.iter().map(|s| s.as_char()).collect();
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(self.name_width + 1)),
                Span::styled(conservation, Style::default().add_modifier(Modifier::BOLD)),
            ]));
            lines.push(Line::from(""));
        });

        lines
    }

    pub fn render_html(&self, alignment: &Alignment) -> String {
        let (ids, sequences, symbols) = self.prepare(alignment);
        let mut html = format!("{HTML_STYLE}\n<div class='sequence-block'>\n");
        let label = |id: &str| {
            format!(
                "<pre style='margin: 0; line-height: 1;'><span style='display: inline-block; width: {}ch;'>{}</span> ",
                self.name_width,
                escape_html(id)
            )
        };

        self.for_each_block(&ids, &sequences, &symbols, |block| {
            for row in &block.rows {
                html.push_str(&label(row.id));
                for &residue in row.residues {
                    let glyph = if residue == GAP {
                        "&#8209;".to_string()
                    } else {
                        escape_html(&residue.to_string())
                    };
                    html.push_str(&format!(
                        "<span class='seq-char' style='color:{};'>{}</span>",
                        self.palette.css(residue),
                        glyph
                    ));
                }
                html.push_str(&format!(" {:>count$}</pre>\n", row.count, count = COUNTER_WIDTH));
            }

            html.push_str(&label(""));
            for symbol in block.symbols {
                html.push_str(&format!("<span class='conservation-char'>{}</span>", symbol.as_char()));
            }
            html.push_str("</pre>\n\n");
        });

        html.push_str("</div>\n");
        html
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::SeqRecord;

    fn alignment(records: &[(&str, &str)]) -> Alignment {
        Alignment::new(records.iter().map(|(id, seq)| SeqRecord::new(*id, *seq)).collect()).unwrap()
    }

    #[test]
    fn test_display_id() {
        assert_eq!(display_id("sp|P69905|HBA_HUMAN", 15), "sp");
        assert_eq!(display_id("a_very_long_identifier_name", 15), "a_very_long_ide");
    }

    #[test]
    fn test_render_plain_single_block() {
        let aln = alignment(&[("sp|P1|A", "MKV-LA"), ("seq2", "MKVQLS")]);
        let text = ClustalRenderer::default().render_plain(&aln);

        let expected = format!(
            "\n{:<15} MKV-LA {:>4}\n{:<15} MKVQLS {:>4}\n{}*****:\n\n",
            "sp", 5, "seq2", 6, " ".repeat(16)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_plain_blocks_and_running_counts() {
        let first = format!("{}{}", "A".repeat(60), "-C");
        let second = format!("{}{}", "-".repeat(60), "GC");
        let aln = alignment(&[("a", &first), ("b", &second)]);
        let text = ClustalRenderer::default().render_plain(&aln);
        let lines: Vec<&str> = text.lines().collect();

        // leading blank, 2 rows + conservation + blank per block
        assert_eq!(lines.len(), 9);
        assert!(lines[1].ends_with("  60"));
        assert!(lines[2].ends_with("   0"));
        assert_eq!(lines[3], format!("{}{}", " ".repeat(16), "*".repeat(60)));
        assert_eq!(lines[5], format!("{:<15} -C {:>4}", "a", 61));
        assert_eq!(lines[6], format!("{:<15} GC {:>4}", "b", 2));
        assert_eq!(lines[7], format!("{}**", " ".repeat(16)));
    }

    #[test]
    fn test_render_styled_uses_palette_and_gap_glyph() {
        let aln = alignment(&[("a", "A-"), ("b", "AC")]);
        let lines = ClustalRenderer::default().render_styled(&aln);

        // two records, conservation line, blank separator
        assert_eq!(lines.len(), 4);
        let spans = &lines[0].spans;
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0].content, format!("{:<15} ", "a"));
        assert_eq!(spans[1].style.fg, Some(ResiduePalette::default().color('A')));
        assert_eq!(spans[2].content, GAP_GLYPH.to_string());
        assert_eq!(spans[3].content, "    1");
        assert_eq!(lines[2].spans[1].content, "**");
    }

    #[test]
    fn test_render_html() {
        let aln = alignment(&[("x<y", "A-"), ("b", "AC")]);
        let html = ClustalRenderer::default().render_html(&aln);

        assert!(html.contains("x&lt;y"));
        assert!(html.contains("<span class='seq-char' style='color:#FF6347;'>A</span>"));
        assert!(html.contains("<span class='seq-char' style='color:#B0C4DE;'>&#8209;</span>"));
        assert!(html.contains("<span class='conservation-char'>*</span>"));
    }

    #[test]
    fn test_custom_line_width() {
        let renderer = ClustalRenderer::new(
            2,
            4,
            ResiduePalette::default(),
            SymbolClassifier::default(),
        );
        let text = renderer.render_plain(&alignment(&[("abcdef", "ABC")]));
        assert_eq!(text, "\nabcd AB    2\n     **\n\nabcd C    3\n     *\n\n");
    }

    #[test]
    fn test_zero_line_width_is_clamped() {
        let renderer = ClustalRenderer::new(
            0,
            1,
            ResiduePalette::default(),
            SymbolClassifier::default(),
        );
        assert_eq!(renderer.line_width(), 1);
        assert_eq!(renderer.name_width(), 1);

        let text = renderer.render_plain(&alignment(&[("x", "AB")]));
        assert_eq!(text, "\nx A    1\n  *\n\nx B    2\n  *\n\n");
    }
}
