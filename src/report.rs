use std::time::Duration;
use log::{info, warn};
use ratatui::text::Line;

use crate::aligner::{Algorithm, AlignmentRun};
use crate::alignment::{Alignment, AlignmentStats};
use crate::newick::PhyloTree;
use crate::scoring::{conservation_scores, identity_matrix, ConservationSymbol, IdentityMatrix, SymbolClassifier};
use crate::ui::clustal::ClustalRenderer;

/// Everything the dashboard and the exporter show for one alignment
#[derive(Debug, Clone)]
pub struct Report {
    /// `None` when the input was already aligned
    pub algorithm: Option<Algorithm>,
    pub alignment: Alignment,
    pub stats: AlignmentStats,
    pub identity: IdentityMatrix,
    pub scores: Vec<f64>,
    pub symbols: Vec<ConservationSymbol>,
    pub plain: String,
    pub styled: Vec<Line<'static>>,
    pub html: String,
    pub guide_tree: Option<String>,
    pub tree: Option<PhyloTree>,
    pub elapsed: Duration,
}

impl Report {
    pub fn build(
        alignment: Alignment,
        algorithm: Option<Algorithm>,
        guide_tree: Option<String>,
        elapsed: Duration,
    ) -> Report {
        let renderer = ClustalRenderer::default();

        let tree = guide_tree.as_deref().and_then(|text| match PhyloTree::parse(text) {
            Ok(tree) => Some(tree),
            Err(e) => {
                warn!("Guide tree could not be drawn: {e}");
                None
            }
        });

        let report = Report {
            algorithm,
            stats: AlignmentStats::from_alignment(&alignment),
            identity: identity_matrix(&alignment),
            scores: conservation_scores(&alignment),
            symbols: SymbolClassifier::default().classify_alignment(&alignment),
            plain: renderer.render_plain(&alignment),
            styled: renderer.render_styled(&alignment),
            html: renderer.render_html(&alignment),
            guide_tree,
            tree,
            elapsed,
            alignment,
        };

        info!(
            "Report ready: {} sequences, {} columns, {} gaps",
            report.stats.total_sequences, report.stats.total_length, report.stats.gap_count
        );
        report
    }

    pub fn from_run(run: AlignmentRun) -> Report {
        Report::build(run.output.alignment, Some(run.algorithm), run.guide_tree, run.elapsed)
    }

    pub fn algorithm_label(&self) -> &'static str {
        self.algorithm.map(Algorithm::label).unwrap_or("Pre-aligned input")
    }

    pub fn file_tag(&self) -> &'static str {
        self.algorithm.map(Algorithm::file_tag).unwrap_or("input")
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    pub fn mean_score(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.iter().sum::<f64>() / self.scores.len() as f64
    }

    /// Count of columns per conservation symbol: (`*`, `:`, `.`)
    pub fn symbol_counts(&self) -> (usize, usize, usize) {
        self.symbols.iter().fold((0, 0, 0), |(i, s, w), symbol| match symbol {
            ConservationSymbol::Identical => (i + 1, s, w),
            ConservationSymbol::Strong => (i, s + 1, w),
            ConservationSymbol::Weak => (i, s, w + 1),
            ConservationSymbol::None => (i, s, w),
        })
    }
}
