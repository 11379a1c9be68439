use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A 2D cell coordinate in the streaming grid (the Y axis plays no part in
/// partitioning).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub z: i32,
}

impl CellCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Cell containing the given world position.
    pub fn from_world(pos: Vec3, cell_size: f32) -> Self {
        Self {
            x: (pos.x / cell_size).floor() as i32,
            z: (pos.z / cell_size).floor() as i32,
        }
    }

    /// Chebyshev distance: the maximum of the absolute per-axis deltas.
    pub fn chebyshev(self, other: CellCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// World-space origin of this cell (its minimum corner).
    pub fn origin(self, cell_size: f32) -> Vec3 {
        Vec3::new(self.x as f32 * cell_size, 0.0, self.z as f32 * cell_size)
    }

    /// World-space center of this cell.
    pub fn center(self, cell_size: f32) -> Vec3 {
        self.origin(cell_size) + Vec3::new(cell_size * 0.5, 0.0, cell_size * 0.5)
    }
}
