//! # spin-core — Slot Session Engine for Spinlab
//!
//! Provides the playable core of a console slot machine: deterministic spin
//! generation, row-based win evaluation, and the stake-balance round loop.
//!
//! ## Features
//!
//! - **Symbol Catalog**: immutable named symbols with coefficients and wilds
//! - **Seeded Spins**: injected random source, reproducible under a seed
//! - **Row Evaluation**: wild-aware adjacent matching with per-cell payouts
//! - **Round Controller**: validate, spin, evaluate, settle, loop to game over
//! - **Session Events**: every observable step streamed to an observer
//!
//! ## Architecture
//!
//! ```text
//! Session
//!     │
//!     ├── SymbolCatalog (names, coefficients, wilds)
//!     ├── GridSpinner (SymbolSampler → SpinGrid)
//!     ├── evaluate (SpinGrid × stake → SpinEvaluation)
//!     └── StakeSource / StakeValidator / SessionObserver (injected seams)
//!           │
//!           v
//!     RoundOutcome → SessionStats
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod money;
pub mod paytable;
pub mod sampler;
pub mod session;
pub mod stake;
pub mod symbols;

pub use config::*;
pub use error::*;
pub use grid::*;
pub use money::*;
pub use paytable::*;
pub use sampler::*;
pub use session::*;
pub use stake::*;
pub use symbols::*;
