use std::cell::Cell;
use std::path::PathBuf;
use log::{debug, error, info};

use crate::export::write_results;
use crate::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    ToolOutput,
    ConservedRegions,
    Dendrogram,
    Evaluation,
    ResultFiles,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::ToolOutput,
        Tab::ConservedRegions,
        Tab::Dendrogram,
        Tab::Evaluation,
        Tab::ResultFiles,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::ToolOutput => "Tool Output",
            Tab::ConservedRegions => "Conserved Regions",
            Tab::Dendrogram => "Dendrogram",
            Tab::Evaluation => "Evaluation Results",
            Tab::ResultFiles => "Result Files",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }
}

pub struct App {
    pub report: Report,
    /// User-supplied input file, copied into the export directory
    pub input: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub tab: Tab,
    pub scroll: u16,
    /// Largest useful scroll offset for the current tab, set while drawing
    pub max_scroll: Cell<u16>,
    pub show_color: bool,
    pub status: Option<String>,
    pub exported: Vec<PathBuf>,
}

impl App {
    pub fn new(report: Report, input: Option<PathBuf>, output_dir: PathBuf) -> App {
        debug!("Creating new App instance");
        App {
            report,
            input,
            output_dir,
            tab: Tab::ToolOutput,
            scroll: 0,
            max_scroll: Cell::new(u16::MAX),
            show_color: true,
            status: None,
            exported: Vec::new(),
        }
    }

    fn select(&mut self, tab: Tab) {
        debug!("Switching to tab {}", tab.title());
        self.tab = tab;
        self.scroll = 0;
        self.max_scroll.set(u16::MAX);
    }

    pub fn next_tab(&mut self) {
        let next = Tab::ALL[(self.tab.index() + 1) % Tab::ALL.len()];
        self.select(next);
    }

    pub fn prev_tab(&mut self) {
        let len = Tab::ALL.len();
        let prev = Tab::ALL[(self.tab.index() + len - 1) % len];
        self.select(prev);
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_add(amount).min(self.max_scroll.get());
    }

    pub fn toggle_color(&mut self) {
        self.show_color = !self.show_color;
        info!("Colored alignment {}", if self.show_color { "on" } else { "off" });
    }

    pub fn export(&mut self) {
        match write_results(&self.output_dir, &self.report, self.input.as_deref()) {
            Ok(written) => {
                self.status = Some(format!(
                    "Exported {} files to {}",
                    written.len(),
                    self.output_dir.display()
                ));
                self.exported = written;
            }
            Err(e) => {
                error!("Export to {:?} failed: {e}", self.output_dir);
                self.status = Some(format!("Export failed: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;
    use crate::alignment::{Alignment, SeqRecord};

    fn app(output_dir: PathBuf) -> App {
        let alignment = Alignment::new(vec![
            SeqRecord::new("a", "MKV"),
            SeqRecord::new("b", "MRV"),
        ])
        .unwrap();
        App::new(Report::build(alignment, None, None, Duration::ZERO), None, output_dir)
    }

    #[test]
    fn test_tab_cycling_wraps() {
        let mut app = app(PathBuf::from("out"));
        app.prev_tab();
        assert_eq!(app.tab, Tab::ResultFiles);
        app.next_tab();
        app.next_tab();
        assert_eq!(app.tab, Tab::ConservedRegions);
    }

    #[test]
    fn test_scroll_is_bounded_and_reset_on_tab_change() {
        let mut app = app(PathBuf::from("out"));
        app.scroll_up(3);
        assert_eq!(app.scroll, 0);

        app.max_scroll.set(5);
        app.scroll_down(10);
        assert_eq!(app.scroll, 5);
        app.scroll_up(2);
        assert_eq!(app.scroll, 3);

        app.next_tab();
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_toggle_color() {
        let mut app = app(PathBuf::from("out"));
        assert!(app.show_color);
        app.toggle_color();
        assert!(!app.show_color);
    }

    #[test]
    fn test_export_writes_files_and_sets_status() {
        let dir = tempdir().unwrap();
        let mut app = app(dir.path().join("results"));
        app.export();

        assert_eq!(app.exported.len(), 4);
        assert!(app.exported.iter().all(|p| p.exists()));
        assert!(app.status.as_deref().unwrap().starts_with("Exported 4 files"));
    }

    #[test]
    fn test_export_failure_is_reported() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let mut app = app(blocker.join("results"));
        app.export();

        assert!(app.exported.is_empty());
        assert!(app.status.as_deref().unwrap().starts_with("Export failed"));
    }
}
