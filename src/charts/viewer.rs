//! Figure Viewer Module
//! Destinations for rendered figures: the system viewer or an in-memory list.

use super::{ChartError, Figure};
use std::fs;
use std::path::PathBuf;

/// Receives each rendered figure.
pub trait FigureSink {
    fn show(&mut self, figure: &Figure) -> Result<(), ChartError>;
}

/// Opens figures with the platform's default SVG viewer.
///
/// The SVG is written under the OS temp directory only so the viewer has
/// something to open. A missing viewer is logged, not treated as an error.
pub struct SystemViewer {
    dir: PathBuf,
}

impl Default for SystemViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemViewer {
    pub fn new() -> Self {
        Self {
            dir: std::env::temp_dir(),
        }
    }

    fn figure_path(&self, figure: &Figure) -> PathBuf {
        self.dir
            .join(format!("{}-{}.svg", figure.file_stem(), std::process::id()))
    }
}

impl FigureSink for SystemViewer {
    fn show(&mut self, figure: &Figure) -> Result<(), ChartError> {
        let path = self.figure_path(figure);
        fs::write(&path, &figure.svg)?;
        log::debug!("Wrote '{}' to {}", figure.title, path.display());

        if let Err(e) = open::that(&path) {
            log::warn!("Could not open viewer for '{}': {}", figure.title, e);
        }
        Ok(())
    }
}

/// Keeps figures in memory.
#[derive(Debug, Default)]
pub struct FigureCollector {
    pub figures: Vec<Figure>,
}

impl FigureCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.figures.iter().map(|f| f.title.as_str()).collect()
    }
}

impl FigureSink for FigureCollector {
    fn show(&mut self, figure: &Figure) -> Result<(), ChartError> {
        self.figures.push(figure.clone());
        Ok(())
    }
}
