//! Charts module - Figure rendering and display

mod renderer;
mod viewer;

pub use renderer::{ChartRenderer, HEATMAP_TITLE, HISTOGRAM_TITLE};
pub use viewer::{FigureCollector, FigureSink, SystemViewer};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("Nothing to draw")]
    NothingToDraw,
    #[error("Failed to hand figure to viewer: {0}")]
    Io(#[from] std::io::Error),
}

/// A rendered figure as a standalone SVG document.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub svg: String,
}

impl Figure {
    /// Title reduced to a file-name friendly stem.
    pub fn file_stem(&self) -> String {
        let stem: String = self
            .title
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        if stem.is_empty() {
            "figure".to_string()
        } else {
            stem
        }
    }
}
