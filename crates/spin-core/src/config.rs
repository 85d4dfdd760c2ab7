//! Machine and session configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SlotError, SlotResult};
use crate::symbols::{Symbol, SymbolCatalog, SymbolColor};

/// Grid specification (rows × columns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of rows
    pub rows: u8,
    /// Number of columns per row
    pub columns: u8,
}

impl GridSpec {
    pub fn new(rows: u8, columns: u8) -> Self {
        Self { rows, columns }
    }

    /// Standard 3×3
    pub fn standard_3x3() -> Self {
        Self {
            rows: 3,
            columns: 3,
        }
    }

    /// Total grid cells
    pub fn cells(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Both dimensions must be positive
    pub fn validate(&self) -> SlotResult<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(SlotError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::standard_3x3()
    }
}

/// A named symbol set. This is the serde model machine definition files
/// deserialize into; a session builds its catalog from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineDefinition {
    /// Machine name shown at session start
    pub name: String,
    /// Symbol definitions in display order
    pub symbols: Vec<Symbol>,
}

impl MachineDefinition {
    /// Stock fruit machine: Apple, Banana, Pineapple and the `*` wild,
    /// drawn uniformly
    pub fn classic() -> Self {
        Self {
            name: "Classic Fruits".into(),
            symbols: vec![
                Symbol::regular("Apple", 0.4, SymbolColor::Green),
                Symbol::regular("Banana", 0.6, SymbolColor::Yellow),
                Symbol::regular("Pineapple", 0.8, SymbolColor::Magenta),
                Symbol::wild("*", 0.0, SymbolColor::White),
            ],
        }
    }

    /// Build the validated catalog for this definition
    pub fn catalog(&self) -> SlotResult<SymbolCatalog> {
        SymbolCatalog::from_symbols(self.symbols.clone())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> SlotResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> SlotResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a definition file
    pub fn from_path(path: impl AsRef<Path>) -> SlotResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

impl Default for MachineDefinition {
    fn default() -> Self {
        Self::classic()
    }
}

/// Session configuration, fixed at session start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Opening balance
    pub initial_balance: f64,
    /// Grid dimensions for every round
    pub grid: GridSpec,
    /// RNG seed; absent seeds from the OS
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn validate(&self) -> SlotResult<()> {
        self.grid.validate()?;
        if !self.initial_balance.is_finite() || self.initial_balance <= 0.0 {
            return Err(SlotError::InvalidConfig(
                "opening balance must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_balance: 100.0,
            grid: GridSpec::default(),
            seed: None,
        }
    }
}
