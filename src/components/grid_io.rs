//! Reading report grids and writing output grids.
//!
//! The playbook core only sees these traits. Spreadsheet formats plug in
//! behind them; the crate ships a JSON file form and an in-memory form.
use crate::components::render::OutputGrid;
use crate::components::report::Grid;
use crate::error::PlaybookResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Anything that can hand over the first sheet of a schedule report
pub trait GridSource {
    fn read_grid(&self) -> PlaybookResult<Grid>;
}

/// Anything that can persist a rendered playbook
pub trait GridSink {
    fn write_grid(&mut self, grid: &OutputGrid) -> PlaybookResult<()>;
}

/// Report grid stored as JSON: an array of rows of typed cells
#[derive(Debug, Clone)]
pub struct JsonGridFile {
    path: PathBuf,
}

impl JsonGridFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GridSource for JsonGridFile {
    fn read_grid(&self) -> PlaybookResult<Grid> {
        let content = fs::read_to_string(&self.path)?;
        let grid: Grid = serde_json::from_str(&content)?;
        info!(path = %self.path.display(), rows = grid.len(), "Read report grid");
        Ok(grid)
    }
}

impl GridSink for JsonGridFile {
    fn write_grid(&mut self, grid: &OutputGrid) -> PlaybookResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(grid)?)?;
        info!(path = %self.path.display(), rows = grid.rows.len(), "Wrote playbook grid");
        Ok(())
    }
}

/// Grid held in memory; reads hand out the stored report and writes are kept
#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    report: Grid,
    written: Vec<OutputGrid>,
}

impl MemoryGrid {
    pub fn new(report: Grid) -> Self {
        Self {
            report,
            written: Vec::new(),
        }
    }

    /// Output grids written so far, oldest first
    pub fn written(&self) -> &[OutputGrid] {
        &self.written
    }
}

impl GridSource for MemoryGrid {
    fn read_grid(&self) -> PlaybookResult<Grid> {
        Ok(self.report.clone())
    }
}

impl GridSink for MemoryGrid {
    fn write_grid(&mut self, grid: &OutputGrid) -> PlaybookResult<()> {
        self.written.push(grid.clone());
        Ok(())
    }
}
