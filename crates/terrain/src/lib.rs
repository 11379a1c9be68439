//! Terrain generation: deterministic heightfield, biome classification,
//! cell surface meshes.
//!
//! # Invariants
//! - Height is a pure function of absolute world x/z; regeneration after an
//!   unload reproduces the exact same surface.
//! - Surface resolution is constant; there is no level-of-detail.
//! - Biome depends only on the distance from the cell center to the world
//!   origin.

mod biome;
mod heightfield;
mod mesh;

pub use biome::{Biome, SurfaceStyle};
pub use heightfield::Heightfield;
pub use mesh::{build_cell_surface, SurfaceMesh};
