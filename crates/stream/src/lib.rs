//! World streaming: keeps a fixed-size grid of terrain cells resident
//! around the player, loading and unloading as the player moves.
//!
//! # Invariants
//! - A cell is resident iff its Chebyshev distance from the player's cell is
//!   within render distance, with one ring of unload hysteresis.
//! - The grid never holds two cells with the same coordinate.
//! - Cell creation happens inline on the ticking thread; there is no
//!   background loading.

mod grid;
mod stats;

pub use grid::{ResidentCell, StreamingGrid, SURFACE_RESOLUTION};
pub use stats::{StreamStats, TickReport, TickTimer};

pub fn crate_info() -> &'static str {
    "wildreach-stream v0.1.0"
}
