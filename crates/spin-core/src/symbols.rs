//! Symbol definitions and the session catalog

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{SlotError, SlotResult};

/// Console palette for symbol presentation. Opaque to the engine; only the
/// renderer interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolColor {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Grey,
}

/// Symbol classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// Regular paying symbol
    Regular,
    /// Wild - matches any neighbor, still pays its own coefficient
    Wild,
}

/// A symbol definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    /// Unique display name (e.g. "Apple", "*")
    pub name: String,
    /// Payout multiplier contributed per cell in a winning row
    pub coefficient: f64,
    /// Display color, presentation only
    pub color: SymbolColor,
    /// Symbol kind
    pub kind: SymbolKind,
    /// Relative draw weight; absent means uniform (weight 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

impl Symbol {
    /// Create a regular symbol
    pub fn regular(name: impl Into<String>, coefficient: f64, color: SymbolColor) -> Self {
        Self {
            name: name.into(),
            coefficient,
            color,
            kind: SymbolKind::Regular,
            weight: None,
        }
    }

    /// Create a wild symbol
    pub fn wild(name: impl Into<String>, coefficient: f64, color: SymbolColor) -> Self {
        Self {
            name: name.into(),
            coefficient,
            color,
            kind: SymbolKind::Wild,
            weight: None,
        }
    }

    /// Set a relative draw weight
    pub fn weighted(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Check if this symbol matches any neighbor
    pub fn is_wild(&self) -> bool {
        self.kind == SymbolKind::Wild
    }

    /// Effective draw weight (unweighted symbols count as 1)
    pub fn draw_weight(&self) -> u32 {
        self.weight.unwrap_or(1)
    }
}

/// Index of a symbol within its catalog. Only minted inside the engine, so
/// an id in circulation always resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub(crate) usize);

impl SymbolId {
    /// Position of the symbol in catalog order
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Ordered, immutable symbol collection with constant-time name lookup.
/// Fixed at session start and never mutated.
#[derive(Debug, Clone)]
pub struct SymbolCatalog {
    symbols: Vec<Symbol>,
    by_name: HashMap<String, SymbolId>,
}

impl SymbolCatalog {
    /// Build a catalog, validating every definition
    pub fn from_symbols(symbols: Vec<Symbol>) -> SlotResult<Self> {
        if symbols.is_empty() {
            return Err(SlotError::EmptyCatalog);
        }
        let mut by_name = HashMap::with_capacity(symbols.len());
        for (index, symbol) in symbols.iter().enumerate() {
            if !symbol.coefficient.is_finite() || symbol.coefficient < 0.0 {
                return Err(SlotError::InvalidSymbol {
                    name: symbol.name.clone(),
                    reason: "coefficient must be a finite non-negative number".into(),
                });
            }
            if symbol.weight == Some(0) {
                return Err(SlotError::InvalidSymbol {
                    name: symbol.name.clone(),
                    reason: "weight must be positive when given".into(),
                });
            }
            if by_name.insert(symbol.name.clone(), SymbolId(index)).is_some() {
                return Err(SlotError::DuplicateSymbol(symbol.name.clone()));
            }
        }
        Ok(Self { symbols, by_name })
    }

    /// Get a symbol by id
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    /// Look up a symbol id by name
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.by_name.get(name).copied()
    }

    /// Look up a symbol id by name, failing if absent. A miss here means a
    /// definition or fixture references a symbol the catalog never defined.
    pub fn require(&self, name: &str) -> SlotResult<SymbolId> {
        self.lookup(name)
            .ok_or_else(|| SlotError::UnknownSymbol(name.to_string()))
    }

    /// Check if an id refers to a wild symbol
    pub fn is_wild(&self, id: SymbolId) -> bool {
        self.symbol(id).is_wild()
    }

    /// Ids of all wild symbols
    pub fn wild_ids(&self) -> Vec<SymbolId> {
        self.iter()
            .filter(|(_, symbol)| symbol.is_wild())
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of symbols in the catalog
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if empty (never true for a constructed catalog)
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate symbols in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(index, symbol)| (SymbolId(index), symbol))
    }

    /// True when any symbol carries an explicit draw weight
    pub fn has_weights(&self) -> bool {
        self.symbols.iter().any(|symbol| symbol.weight.is_some())
    }

    /// Sum of effective draw weights
    pub fn total_weight(&self) -> u64 {
        self.symbols
            .iter()
            .map(|symbol| u64::from(symbol.draw_weight()))
            .sum()
    }
}
