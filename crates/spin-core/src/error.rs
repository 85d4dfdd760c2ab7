//! Error types for the slot session engine

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Duplicate symbol: {0}")]
    DuplicateSymbol(String),

    #[error("Symbol catalog is empty")]
    EmptyCatalog,

    #[error("Invalid symbol {name}: {reason}")]
    InvalidSymbol { name: String, reason: String },

    #[error("Invalid grid dimensions: {rows}x{columns}")]
    InvalidDimensions { rows: u8, columns: u8 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Ragged grid row: expected {expected} columns, got {actual}")]
    RaggedRow { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed machine definition: {0}")]
    Definition(#[from] serde_json::Error),

    #[error("Input closed before a value was read")]
    InputClosed,
}

/// Result type alias
pub type SlotResult<T> = Result<T, SlotError>;
