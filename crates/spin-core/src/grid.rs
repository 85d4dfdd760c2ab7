//! Spin grids and the grid spinner

use rand::Rng;
use serde::Serialize;

use crate::config::GridSpec;
use crate::error::{SlotError, SlotResult};
use crate::sampler::SymbolSampler;
use crate::symbols::{SymbolCatalog, SymbolId};

/// One spun grid: a row-major R×C arrangement of symbol ids. Produced anew
/// each spin, owned by the round, discarded after evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinGrid {
    spec: GridSpec,
    cells: Vec<SymbolId>,
}

impl SpinGrid {
    /// Dimensions of this grid
    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    /// Symbol at (row, column)
    pub fn symbol_at(&self, row: usize, column: usize) -> SymbolId {
        self.cells[row * self.spec.columns as usize + column]
    }

    /// One row, left to right
    pub fn row(&self, row: usize) -> &[SymbolId] {
        let columns = self.spec.columns as usize;
        &self.cells[row * columns..(row + 1) * columns]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[SymbolId]> {
        self.cells.chunks(self.spec.columns as usize)
    }

    /// Build a grid from symbol names, resolving each against the catalog.
    /// A name the catalog does not define is a hard error.
    pub fn from_names(catalog: &SymbolCatalog, rows: &[Vec<&str>]) -> SlotResult<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        let spec = GridSpec::new(rows.len() as u8, columns as u8);
        spec.validate()?;

        let mut cells = Vec::with_capacity(spec.cells());
        for row in rows {
            if row.len() != columns {
                return Err(SlotError::RaggedRow {
                    expected: columns,
                    actual: row.len(),
                });
            }
            for name in row {
                cells.push(catalog.require(name)?);
            }
        }
        Ok(Self { spec, cells })
    }
}

/// Fills grids by repeated draws from the sampler: one independent draw per
/// cell, row-major, no adjacency constraints.
#[derive(Debug)]
pub struct GridSpinner<R: Rng> {
    spec: GridSpec,
    sampler: SymbolSampler<R>,
}

impl<R: Rng> GridSpinner<R> {
    pub fn new(spec: GridSpec, sampler: SymbolSampler<R>) -> Self {
        Self { spec, sampler }
    }

    /// Dimensions every spin fills
    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    /// Spin one grid (rows × columns draws)
    pub fn spin(&mut self, catalog: &SymbolCatalog) -> SpinGrid {
        let mut cells = Vec::with_capacity(self.spec.cells());
        for _ in 0..self.spec.cells() {
            cells.push(self.sampler.draw(catalog));
        }
        SpinGrid {
            spec: self.spec,
            cells,
        }
    }
}
