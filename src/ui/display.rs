//! Line builders for the dashboard tabs

use std::path::{Path, PathBuf};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use crate::export::result_files;
use crate::newick::render_dendrogram;
use crate::report::Report;
use crate::scoring::IdentityMatrix;
use crate::ui::colors::{ACCENT, MUTED};
use crate::ui::heatmap::{heatmap_legend, heatmap_lines};

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(value, Style::default().fg(color)),
    ])
}

/// Tool Output tab: run summary followed by the alignment itself
pub fn tool_output_lines(report: &Report, show_color: bool) -> Vec<Line<'static>> {
    let mut lines = vec![
        field("Algorithm", report.algorithm_label().to_string(), Color::Green),
        field("Execution time", format!("{:.2} ms", report.elapsed_ms()), Color::Yellow),
    ];

    if show_color {
        lines.extend(report.styled.iter().cloned());
    } else {
        lines.extend(report.plain.lines().map(|l| Line::from(l.to_string())));
    }
    lines
}

pub fn identity_matrix_lines(matrix: &IdentityMatrix) -> Vec<Line<'static>> {
    let mut header = format!("{:<10}", "");
    for i in 1..=matrix.len() {
        header.push_str(&format!("{i:>10}"));
    }

    let mut lines = vec![
        heading("Sequence Identity Matrix (%)"),
        Line::from(Span::styled(header, Style::default().fg(MUTED))),
    ];
    lines.extend(matrix.display_rows().into_iter().map(Line::from));
    lines
}

/// Conserved Regions tab; `width` is the drawable width for the heatmap
pub fn conserved_region_lines(report: &Report, width: usize) -> Vec<Line<'static>> {
    let mut lines = identity_matrix_lines(&report.identity);
    lines.push(Line::from(""));
    lines.push(heading("Conservation Heatmap"));
    lines.push(heatmap_legend());
    lines.push(Line::from(""));
    lines.extend(heatmap_lines(&report.scores, width));
    lines
}

pub fn dendrogram_lines(report: &Report, width: usize) -> Vec<Line<'static>> {
    let Some(text) = &report.guide_tree else {
        return vec![Line::from(Span::styled(
            "No guide tree available",
            Style::default().fg(MUTED),
        ))];
    };

    let mut lines = Vec::new();
    if let Some(tree) = &report.tree {
        lines.push(heading("Dendrogram"));
        lines.extend(
            render_dendrogram(tree, width)
                .into_iter()
                .map(|row| Line::from(Span::styled(row, Style::default().fg(Color::Green)))),
        );
        lines.push(Line::from(""));
    }

    lines.push(heading("Guide Tree (Newick)"));
    lines.extend(text.lines().map(|l| Line::from(l.to_string())));
    lines
}

pub fn evaluation_lines(report: &Report) -> Vec<Line<'static>> {
    let stats = &report.stats;
    let (identical, strong, weak) = report.symbol_counts();

    vec![
        heading("Alignment Statistics"),
        field("Algorithm", report.algorithm_label().to_string(), Color::Green),
        field("Total sequences", stats.total_sequences.to_string(), Color::Cyan),
        field("Alignment length", stats.total_length.to_string(), Color::Cyan),
        field("Gap count", stats.gap_count.to_string(), Color::Yellow),
        field("Gap percentage", format!("{:.2}%", stats.gap_percentage()), Color::Yellow),
        field("Execution time", format!("{:.2} ms", report.elapsed_ms()), Color::Magenta),
        Line::from(""),
        heading("Conservation"),
        field("Mean conservation score", format!("{:.4}", report.mean_score()), Color::Blue),
        field("Identical columns (*)", identical.to_string(), Color::Green),
        field("Strongly similar columns (:)", strong.to_string(), Color::Green),
        field("Weakly similar columns (.)", weak.to_string(), Color::Green),
    ]
}

/// Result Files tab: every file the exporter writes, marked once written
pub fn result_file_lines(
    report: &Report,
    input: Option<&Path>,
    output_dir: &Path,
    exported: &[PathBuf],
) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Result Files"),
        field("Output directory", output_dir.display().to_string(), Color::Cyan),
        Line::from(""),
    ];

    for file in result_files(report, input) {
        let path = output_dir.join(&file.file_name);
        let (marker, color) = if exported.contains(&path) {
            ("[x]", Color::Green)
        } else {
            ("[ ]", MUTED)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker} "), Style::default().fg(color)),
            Span::raw(format!("{:<22}", file.kind.description())),
            Span::styled(file.file_name, Style::default().fg(Color::Yellow)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press 'e' to export",
        Style::default().fg(MUTED),
    )));
    lines
}
