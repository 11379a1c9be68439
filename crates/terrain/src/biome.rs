use serde::{Deserialize, Serialize};
use wildreach_common::CellCoord;

/// Biome classification of a cell, derived purely from the straight-line
/// distance between the cell's center and the world origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Village,
    Forest,
    Mountains,
    Desert,
}

impl Biome {
    /// Classify by distance from the world origin.
    ///
    /// Thresholds are half-open at exactly 100/300/500: a center 99 units
    /// out is Village, a center at 100 or 101 is Forest.
    pub fn classify(distance_from_origin: f32) -> Self {
        if distance_from_origin < 100.0 {
            Self::Village
        } else if distance_from_origin < 300.0 {
            Self::Forest
        } else if distance_from_origin < 500.0 {
            Self::Mountains
        } else {
            Self::Desert
        }
    }

    /// Biome of the cell with the given coordinate.
    pub fn for_cell(coord: CellCoord, cell_size: f32) -> Self {
        let center = coord.center(cell_size);
        Self::classify(center.x.hypot(center.z))
    }

    /// Fixed surface appearance preset for this biome.
    pub fn style(self) -> SurfaceStyle {
        match self {
            Self::Village => SurfaceStyle {
                base_color: [0.45, 0.62, 0.34, 1.0],
                roughness: 0.85,
            },
            Self::Forest => SurfaceStyle {
                base_color: [0.18, 0.42, 0.20, 1.0],
                roughness: 0.9,
            },
            Self::Mountains => SurfaceStyle {
                base_color: [0.48, 0.47, 0.50, 1.0],
                roughness: 0.75,
            },
            Self::Desert => SurfaceStyle {
                base_color: [0.82, 0.72, 0.48, 1.0],
                roughness: 0.95,
            },
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Village => "village",
            Self::Forest => "forest",
            Self::Mountains => "mountains",
            Self::Desert => "desert",
        };
        f.write_str(name)
    }
}

/// Surface appearance preset: base color plus roughness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceStyle {
    pub base_color: [f32; 4],
    pub roughness: f32,
}
