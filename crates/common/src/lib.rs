//! Shared types for the wildreach terrain streaming core.
//!
//! # Invariants
//! - Cell coordinates are integer pairs; world positions map to cells by
//!   flooring, so every position belongs to exactly one cell.
//! - Configuration is validated before any grid is built from it.

mod config;
mod types;

pub use config::{ConfigError, GridConfig};
pub use types::CellCoord;
