use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::{
    app::{App, Tab},
    ui::{
        colors::{ACCENT, MUTED},
        display::{
            conserved_region_lines, dendrogram_lines, evaluation_lines, result_file_lines,
            tool_output_lines,
        },
    },
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_title(f, app, chunks[0]);
    render_tabs(f, app, chunks[1]);
    render_body(f, app, chunks[2]);
    render_status_bar(f, app, chunks[3]);
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let stats = &app.report.stats;
    let spans = vec![
        Span::styled("msaview", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled(app.report.algorithm_label(), Style::default().fg(Color::Green)),
        Span::raw("   "),
        Span::styled(
            format!("{} sequences x {} columns", stats.total_sequences, stats.total_length),
            Style::default().fg(Color::Yellow),
        ),
    ];

    let title_widget = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title_widget, area);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(app.tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

fn render_body(f: &mut Frame, app: &App, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2);

    let lines = match app.tab {
        Tab::ToolOutput => tool_output_lines(&app.report, app.show_color),
        Tab::ConservedRegions => conserved_region_lines(&app.report, inner_width),
        Tab::Dendrogram => dendrogram_lines(&app.report, inner_width),
        Tab::Evaluation => evaluation_lines(&app.report),
        Tab::ResultFiles => result_file_lines(
            &app.report,
            app.input.as_deref(),
            &app.output_dir,
            &app.exported,
        ),
    };

    let max_scroll = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_sub(inner_height);
    app.max_scroll.set(max_scroll);

    let body = Paragraph::new(lines)
        .block(Block::default().title(app.tab.title()).borders(Borders::ALL))
        .scroll((app.scroll.min(max_scroll), 0));
    f.render_widget(body, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        "Tab/\u{2190}\u{2192}: switch  \u{2191}\u{2193}/PgUp/PgDn: scroll  c: color  e: export  q: quit",
        Style::default().fg(MUTED),
    )];
    if let Some(status) = &app.status {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::Green)));
    }

    let status_widget = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status_widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use ratatui::{backend::TestBackend, Terminal};
    use crate::alignment::{Alignment, SeqRecord};
    use crate::report::Report;

    fn app() -> App {
        let records = (0..30)
            .map(|i| SeqRecord::new(format!("seq{i}"), "MKVLA"))
            .collect();
        let report = Report::build(Alignment::new(records).unwrap(), None, None, Duration::ZERO);
        App::new(report, None, PathBuf::from("out"))
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_every_tab() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = app();

        for tab in Tab::ALL {
            terminal.draw(|f| render_ui(f, &app)).unwrap();
            assert!(screen(&terminal).contains(tab.title()));
            app.next_tab();
        }
    }

    #[test]
    fn test_render_records_scroll_limit() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let app = app();
        terminal.draw(|f| render_ui(f, &app)).unwrap();

        // body is 30 - 2 margin - 3 - 3 - 3 = 19 rows, 17 inside the border
        let lines = tool_output_lines(&app.report, true).len() as u16;
        assert_eq!(app.max_scroll.get(), lines - 17);
    }
}
