//! Top-level game state: owns the streaming grid, the scene backend, and
//! the environment set-piece registry.
//!
//! # Invariants
//! - Registries are owned by the game world, never global.
//! - Set-pieces have no streaming lifecycle: created at startup, alive until
//!   removed.

mod world;

pub use world::{Environment, GameWorld, PlacedEnvironment, PropId, WorldSummary};

pub fn crate_info() -> &'static str {
    "wildreach-world v0.1.0"
}
