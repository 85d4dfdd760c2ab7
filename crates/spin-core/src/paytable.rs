//! Row evaluation and payout calculation

use serde::Serialize;

use crate::grid::SpinGrid;
use crate::money::round_to_cents;
use crate::symbols::{SymbolCatalog, SymbolId};

/// A win on a single grid row
#[derive(Debug, Clone, Serialize)]
pub struct RowWin {
    /// Row index (0 = top)
    pub row: usize,
    /// The shared non-wild symbol name; the wild's own name when the whole
    /// row is wild
    pub symbol: String,
    /// Sum of every cell's coefficient in the row, wilds included
    pub coefficient_sum: f64,
    /// Coefficient sum × stake, rounded to cents
    pub win_amount: f64,
}

/// Result of evaluating one spun grid against a stake
#[derive(Debug, Clone, Serialize)]
pub struct SpinEvaluation {
    /// Winning rows, top to bottom
    pub row_wins: Vec<RowWin>,
    /// Total win amount, rounded to cents
    pub total_win: f64,
    /// Win-to-stake ratio
    pub win_ratio: f64,
}

impl SpinEvaluation {
    /// Check if anything paid
    pub fn is_win(&self) -> bool {
        self.total_win > 0.0
    }
}

/// Evaluate every row of a grid independently against a stake.
///
/// A row wins when each cell, read left to right, either is wild or matches
/// the nearest non-wild cell to its left; a single mismatch anywhere voids
/// the row. A winning row pays the sum of all its cell coefficients (wilds
/// included) multiplied by the stake.
pub fn evaluate(catalog: &SymbolCatalog, grid: &SpinGrid, stake: f64) -> SpinEvaluation {
    let mut row_wins = Vec::new();

    for (row_index, row) in grid.rows().enumerate() {
        if let Some(win) = evaluate_row(catalog, row_index, row, stake) {
            row_wins.push(win);
        }
    }

    let total_win = round_to_cents(row_wins.iter().map(|win| win.win_amount).sum());
    SpinEvaluation {
        row_wins,
        total_win,
        win_ratio: if stake > 0.0 { total_win / stake } else { 0.0 },
    }
}

fn evaluate_row(
    catalog: &SymbolCatalog,
    row_index: usize,
    row: &[SymbolId],
    stake: f64,
) -> Option<RowWin> {
    // Wilds are transparent: each non-wild cell must match the nearest
    // non-wild cell to its left
    let mut reference: Option<SymbolId> = None;
    for &id in row {
        if catalog.is_wild(id) {
            continue;
        }
        match reference {
            None => reference = Some(id),
            Some(expected) if expected == id => {}
            Some(_) => return None,
        }
    }

    // All-wild rows fall through with no reference and name the wild itself
    let name_id = reference.or_else(|| row.first().copied())?;
    let coefficient_sum: f64 = row.iter().map(|&id| catalog.symbol(id).coefficient).sum();

    Some(RowWin {
        row: row_index,
        symbol: catalog.symbol(name_id).name.clone(),
        coefficient_sum,
        win_amount: round_to_cents(coefficient_sum * stake),
    })
}
