//! Conservation heatmap drawn as rows of colored cells

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use crate::ui::colors::{heatmap_color, MUTED};

const CELL: &str = "█";
const TICK: usize = 10;

/// Rows of `width` cells, each preceded by a position ruler ticked every 10
/// columns. `width` is rounded down to a whole number of ticks.
pub fn heatmap_lines(scores: &[f64], width: usize) -> Vec<Line<'static>> {
    let per_row = (width / TICK).max(1) * TICK;
    let mut lines = Vec::new();

    for (row, chunk) in scores.chunks(per_row).enumerate() {
        let start = row * per_row;

        let mut ruler = String::new();
        for offset in (0..chunk.len()).step_by(TICK) {
            let label = (start + offset + 1).to_string();
            let span = TICK.min(chunk.len() - offset);
            ruler.push_str(&format!("{label:<span$.span$}"));
        }
        lines.push(Line::from(Span::styled(ruler, Style::default().fg(MUTED))));

        let cells: Vec<Span<'static>> = chunk
            .iter()
            .map(|&score| Span::styled(CELL, Style::default().fg(heatmap_color(score))))
            .collect();
        lines.push(Line::from(cells));
    }

    lines
}

pub fn heatmap_legend() -> Line<'static> {
    let mut spans = vec![Span::raw("Conservation score: ")];
    for (label, score) in [("Low", 0.2), ("Medium", 0.5), ("High", 0.8)] {
        spans.push(Span::styled(CELL.repeat(2), Style::default().fg(heatmap_color(score))));
        spans.push(Span::styled(format!(" {label}  "), Style::default().fg(Color::White)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heatmap_rows_and_ruler() {
        let scores = vec![0.5; 25];
        let lines = heatmap_lines(&scores, 23);

        // 20 cells per row -> two rows, each with a ruler
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].spans[0].content, format!("{:<10}{:<10}", 1, 11));
        assert_eq!(lines[1].spans.len(), 20);
        assert_eq!(lines[2].spans[0].content, "21   ");
        assert_eq!(lines[3].spans.len(), 5);
        assert_eq!(lines[1].spans[0].style.fg, Some(heatmap_color(0.5)));
    }

    #[test]
    fn test_heatmap_narrow_width_still_draws() {
        let lines = heatmap_lines(&[1.0, 0.0], 3);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans.len(), 2);
    }

    #[test]
    fn test_heatmap_empty_scores() {
        assert!(heatmap_lines(&[], 80).is_empty());
    }
}
