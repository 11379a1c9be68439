use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wildreach_common::{CellCoord, ConfigError, GridConfig};
use wildreach_scene::SceneBackend;
use wildreach_stream::{StreamingGrid, TickReport};

/// Unique identifier for a placed environment set-piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropId(pub Uuid);

impl PropId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PropId {
    fn default() -> Self {
        Self::new()
    }
}

/// An environment set-piece. Each variant carries its own explicit field
/// set; there are no open-ended property bags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Village { houses: u32, has_well: bool },
    Forest { trees: u32, canopy_density: f32 },
    Mountain { peak_height: f32, snow_line: f32 },
    Temple { pillars: u32, collapsed: bool },
    Market { stalls: u32, covered: bool },
}

/// A set-piece placed at a fixed world position.
///
/// Set-pieces are created once at startup and live until explicitly
/// removed; placement does not participate in cell streaming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedEnvironment {
    pub position: Vec3,
    pub kind: Environment,
}

/// Top-level game state: the streaming grid, the scene backend it drives,
/// and the environment registry.
///
/// Registries are owned here, not global. BTreeMap gives deterministic
/// iteration order over placed set-pieces.
pub struct GameWorld<S: SceneBackend> {
    grid: StreamingGrid,
    scene: S,
    environments: BTreeMap<PropId, PlacedEnvironment>,
}

impl<S: SceneBackend> GameWorld<S> {
    pub fn new(config: GridConfig, scene: S) -> Result<Self, ConfigError> {
        Ok(Self {
            grid: StreamingGrid::new(config)?,
            scene,
            environments: BTreeMap::new(),
        })
    }

    pub fn grid(&self) -> &StreamingGrid {
        &self.grid
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Record the latest player position sample; streamed on the next tick.
    pub fn set_player_position(&mut self, pos: Vec3) {
        self.grid.set_player_position(pos);
    }

    /// Run one streaming pass against the owned scene backend.
    pub fn tick(&mut self) -> TickReport {
        self.grid.tick(&mut self.scene)
    }

    /// Place a set-piece at a world position. Returns its id.
    pub fn place(&mut self, position: Vec3, kind: Environment) -> PropId {
        let id = PropId::new();
        self.environments
            .insert(id, PlacedEnvironment { position, kind });
        id
    }

    /// Remove a set-piece. Returns its data if it existed.
    pub fn remove(&mut self, id: PropId) -> Option<PlacedEnvironment> {
        self.environments.remove(&id)
    }

    pub fn get(&self, id: PropId) -> Option<&PlacedEnvironment> {
        self.environments.get(&id)
    }

    /// Read-only access to all set-pieces (deterministic iteration order).
    pub fn environments(&self) -> &BTreeMap<PropId, PlacedEnvironment> {
        &self.environments
    }

    /// Ids of set-pieces whose position falls inside the given cell.
    pub fn environments_in_cell(&self, coord: CellCoord) -> Vec<PropId> {
        let cell_size = self.grid.config().cell_size;
        self.environments
            .iter()
            .filter(|(_, placed)| CellCoord::from_world(placed.position, cell_size) == coord)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn summary(&self) -> WorldSummary {
        WorldSummary {
            player_cell: self.grid.player_cell(),
            resident_cells: self.grid.resident_count(),
            environments: self.environments.len(),
        }
    }
}

/// Summary of world state for tooling output.
#[derive(Debug, Clone)]
pub struct WorldSummary {
    pub player_cell: CellCoord,
    pub resident_cells: usize,
    pub environments: usize,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: player_cell=({}, {}) resident_cells={} environments={}",
            self.player_cell.x, self.player_cell.z, self.resident_cells, self.environments
        )
    }
}
