//! Terminal dashboard: colors, alignment rendering and the tab views

pub mod clustal;
pub mod colors;
pub mod display;
pub mod heatmap;
pub mod renderer;

pub use clustal::ClustalRenderer;
pub use renderer::render_ui;
