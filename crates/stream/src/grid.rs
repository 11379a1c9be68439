use std::collections::HashMap;
use std::time::Instant;

use glam::Vec3;
use wildreach_common::{CellCoord, ConfigError, GridConfig};
use wildreach_scene::{SceneBackend, SceneError, SurfaceHandle};
use wildreach_terrain::{build_cell_surface, Biome, Heightfield};

use crate::stats::{StreamStats, TickReport};

/// Quads per cell edge. Constant regardless of distance from the player;
/// there is no level-of-detail.
pub const SURFACE_RESOLUTION: u32 = 16;

/// A terrain cell currently instantiated in the scene.
#[derive(Debug)]
pub struct ResidentCell {
    pub coord: CellCoord,
    pub biome: Biome,
    pub surface: SurfaceHandle,
    pub origin: Vec3,
    /// Set once the cell has sat exactly one ring beyond render distance for
    /// a full tick; the next such tick unloads it.
    lingering: bool,
}

/// The streaming grid: keeps the resident cell set matched to the player's
/// position, creating and destroying cells as the player moves.
///
/// Single mutator, single thread: `tick` runs to completion inline on the
/// caller's thread and never suspends. The grid exclusively owns every
/// resident cell's surface handle; nothing else may hold one past unload.
pub struct StreamingGrid {
    config: GridConfig,
    field: Heightfield,
    player_pos: Vec3,
    cells: HashMap<CellCoord, ResidentCell>,
    stats: StreamStats,
}

impl StreamingGrid {
    /// Build a grid from a validated configuration.
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            field: Heightfield::default(),
            player_pos: Vec3::ZERO,
            cells: HashMap::new(),
            stats: StreamStats::default(),
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn heightfield(&self) -> &Heightfield {
        &self.field
    }

    /// Record the latest player position sample. No other side effects; the
    /// load/unload pass happens on the next tick.
    pub fn set_player_position(&mut self, pos: Vec3) {
        self.player_pos = pos;
    }

    /// Cell the player is currently in.
    pub fn player_cell(&self) -> CellCoord {
        CellCoord::from_world(self.player_pos, self.config.cell_size)
    }

    pub fn is_resident(&self, coord: CellCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    pub fn resident_count(&self) -> usize {
        self.cells.len()
    }

    /// Coordinates of all resident cells, sorted for stable output.
    pub fn resident_coords(&self) -> Vec<CellCoord> {
        let mut coords: Vec<CellCoord> = self.cells.keys().copied().collect();
        coords.sort();
        coords
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&ResidentCell> {
        self.cells.get(&coord)
    }

    /// Counters from the most recent tick.
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    /// Run one load/unload pass against the last sampled player position.
    ///
    /// Unload runs first so freed slots are available to the load pass when
    /// a resident cap is set. Within a tick the two passes touch disjoint
    /// coordinates, so the end-of-tick state does not depend on the order.
    pub fn tick(&mut self, scene: &mut dyn SceneBackend) -> TickReport {
        let _span = tracing::info_span!("stream_tick").entered();
        let start = Instant::now();
        let player = self.player_cell();
        let rd = self.config.render_distance;

        // Unload pass, with one cell of hysteresis: a cell exactly one ring
        // beyond render distance survives the tick it fell out of range and
        // unloads on the next. Anything farther goes immediately: a teleport
        // releases the entire old set synchronously, in the same tick the
        // new set loads.
        let mut to_remove = Vec::new();
        for (coord, cell) in self.cells.iter_mut() {
            let d = coord.chebyshev(player);
            if d <= rd {
                cell.lingering = false;
            } else if d > rd + 1 || cell.lingering {
                to_remove.push(*coord);
            } else {
                cell.lingering = true;
            }
        }
        let mut destroyed = Vec::with_capacity(to_remove.len());
        for coord in to_remove {
            if let Some(cell) = self.cells.remove(&coord) {
                scene.destroy_surface(cell.surface);
                tracing::debug!(?coord, "unloaded cell");
                destroyed.push(coord);
            }
        }

        // Load pass: square scan over the render-distance window. Missing
        // coordinates are created nearest-first so a resident cap keeps the
        // cells around the player.
        let mut missing = Vec::new();
        for dx in -rd..=rd {
            for dz in -rd..=rd {
                let coord = CellCoord::new(player.x + dx, player.z + dz);
                if !self.cells.contains_key(&coord) {
                    missing.push(coord);
                }
            }
        }
        missing.sort_by_key(|c| (c.chebyshev(player), c.x, c.z));

        let mut created = Vec::new();
        let mut failed = Vec::new();
        let mut skipped_for_cap = 0;
        for coord in missing {
            if let Some(cap) = self.config.max_resident {
                if self.cells.len() >= cap {
                    skipped_for_cap += 1;
                    continue;
                }
            }
            match self.load_cell(coord, scene) {
                Ok(()) => created.push(coord),
                Err(err) => {
                    // The load pass re-attempts every in-range, non-resident
                    // coordinate, so this cell retries each tick until it
                    // succeeds or drops out of range.
                    tracing::warn!(?coord, %err, "surface creation failed");
                    failed.push(coord);
                }
            }
        }
        if skipped_for_cap > 0 {
            tracing::debug!(skipped_for_cap, "resident cap reached");
        }

        let report = TickReport {
            created,
            destroyed,
            failed,
            skipped_for_cap,
            resident: self.cells.len(),
            duration: start.elapsed(),
        };
        self.stats = StreamStats::from_report(&report);
        tracing::trace!(
            created = self.stats.created_this_tick,
            destroyed = self.stats.destroyed_this_tick,
            resident = self.stats.resident,
            "tick complete"
        );
        report
    }

    fn load_cell(
        &mut self,
        coord: CellCoord,
        scene: &mut dyn SceneBackend,
    ) -> Result<(), SceneError> {
        let cell_size = self.config.cell_size;
        let mesh = build_cell_surface(coord, cell_size, SURFACE_RESOLUTION, &self.field);
        let biome = Biome::for_cell(coord, cell_size);
        let surface = scene.create_surface(&mesh, &biome.style())?;
        tracing::debug!(?coord, %biome, "loaded cell");
        self.cells.insert(
            coord,
            ResidentCell {
                coord,
                biome,
                surface,
                origin: coord.origin(cell_size),
                lingering: false,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildreach_scene::RecordingScene;

    fn grid(cell_size: f32, render_distance: i32) -> StreamingGrid {
        StreamingGrid::new(GridConfig {
            cell_size,
            render_distance,
            max_resident: None,
        })
        .unwrap()
    }

    fn in_range(player: CellCoord, rd: i32) -> Vec<CellCoord> {
        let mut coords = Vec::new();
        for dx in -rd..=rd {
            for dz in -rd..=rd {
                coords.push(CellCoord::new(player.x + dx, player.z + dz));
            }
        }
        coords.sort();
        coords
    }

    #[test]
    fn initial_load_creates_the_full_square() {
        let mut grid = grid(100.0, 1);
        let mut scene = RecordingScene::new();

        let report = grid.tick(&mut scene);
        assert_eq!(report.created.len(), 9);
        assert_eq!(report.destroyed.len(), 0);
        assert_eq!(
            grid.resident_coords(),
            in_range(CellCoord::new(0, 0), 1)
        );
        assert_eq!(scene.live_count(), 9);
    }

    #[test]
    fn second_tick_without_movement_is_idempotent() {
        let mut grid = grid(100.0, 2);
        let mut scene = RecordingScene::new();

        grid.tick(&mut scene);
        let report = grid.tick(&mut scene);
        assert!(report.created.is_empty());
        assert!(report.destroyed.is_empty());
        assert_eq!(grid.resident_count(), 25);
    }

    #[test]
    fn single_axis_move_creates_the_leading_column() {
        let mut grid = grid(100.0, 1);
        let mut scene = RecordingScene::new();
        grid.tick(&mut scene);

        grid.set_player_position(Vec3::new(150.0, 0.0, 50.0)); // cell (1, 0)
        let report = grid.tick(&mut scene);

        let mut created = report.created.clone();
        created.sort();
        assert_eq!(
            created,
            vec![
                CellCoord::new(2, -1),
                CellCoord::new(2, 0),
                CellCoord::new(2, 1)
            ]
        );
        // The trailing column at x = -1 is exactly one ring out: it lingers
        // this tick and unloads on the next.
        assert!(report.destroyed.is_empty());
        assert!(grid.is_resident(CellCoord::new(-1, 0)));

        let report = grid.tick(&mut scene);
        let mut destroyed = report.destroyed;
        destroyed.sort();
        assert_eq!(
            destroyed,
            vec![
                CellCoord::new(-1, -1),
                CellCoord::new(-1, 0),
                CellCoord::new(-1, 1)
            ]
        );
    }

    #[test]
    fn steady_state_matches_the_residency_invariant() {
        let mut grid = grid(100.0, 2);
        let mut scene = RecordingScene::new();
        grid.tick(&mut scene);

        grid.set_player_position(Vec3::new(730.0, 12.0, -410.0)); // cell (7, -5)
        grid.tick(&mut scene);
        grid.tick(&mut scene); // drains lingering cells

        assert_eq!(
            grid.resident_coords(),
            in_range(CellCoord::new(7, -5), 2)
        );
    }

    #[test]
    fn lingering_cell_returns_to_range_without_reload() {
        let mut grid = grid(100.0, 1);
        let mut scene = RecordingScene::new();
        grid.tick(&mut scene);

        // Step right: x = -1 column lingers.
        grid.set_player_position(Vec3::new(150.0, 0.0, 50.0));
        grid.tick(&mut scene);
        let created_so_far = scene.created();

        // Step back before the lingering cells expire: they are in range
        // again and must not have been recreated.
        grid.set_player_position(Vec3::new(50.0, 0.0, 50.0));
        let report = grid.tick(&mut scene);
        assert!(report.created.is_empty());
        assert_eq!(scene.created(), created_so_far);
        assert!(grid.is_resident(CellCoord::new(-1, 0)));
    }

    #[test]
    fn teleport_flushes_the_old_set_in_one_tick() {
        let mut grid = grid(100.0, 1);
        let mut scene = RecordingScene::new();
        grid.tick(&mut scene);

        grid.set_player_position(Vec3::new(5000.0, 0.0, 5000.0)); // cell (50, 50)
        let report = grid.tick(&mut scene);

        assert_eq!(report.destroyed.len(), 9);
        assert_eq!(report.created.len(), 9);
        assert_eq!(
            grid.resident_coords(),
            in_range(CellCoord::new(50, 50), 1)
        );
        assert_eq!(scene.live_count(), 9);
    }

    #[test]
    fn residency_is_unique_per_coordinate() {
        let mut grid = grid(100.0, 1);
        let mut scene = RecordingScene::new();
        grid.tick(&mut scene);
        grid.tick(&mut scene);

        // One surface per resident coordinate: no double-creates.
        assert_eq!(scene.created(), grid.resident_count());
        let coords = grid.resident_coords();
        let mut deduped = coords.clone();
        deduped.dedup();
        assert_eq!(coords, deduped);
    }

    #[test]
    fn failed_creation_retries_next_tick() {
        let mut grid = grid(100.0, 1);
        let mut scene = RecordingScene::new();
        scene.fail_next(1);

        let report = grid.tick(&mut scene);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.created.len(), 8);
        let failed = report.failed[0];
        assert!(!grid.is_resident(failed));

        // The coordinate is still in range and non-resident, so the next
        // tick re-attempts it.
        let report = grid.tick(&mut scene);
        assert_eq!(report.created, vec![failed]);
        assert!(report.failed.is_empty());
        assert_eq!(grid.resident_count(), 9);
    }

    #[test]
    fn resident_cap_is_honored_nearest_first() {
        let mut grid = StreamingGrid::new(GridConfig {
            cell_size: 100.0,
            render_distance: 2,
            max_resident: Some(9),
        })
        .unwrap();
        let mut scene = RecordingScene::new();

        let report = grid.tick(&mut scene);
        assert_eq!(report.created.len(), 9);
        assert_eq!(report.skipped_for_cap, 16);
        assert_eq!(grid.resident_count(), 9);

        // Nearest-first: the cap keeps the inner ring, the player cell first.
        assert_eq!(report.created[0], CellCoord::new(0, 0));
        for coord in &report.created {
            assert!(coord.chebyshev(CellCoord::new(0, 0)) <= 1);
        }
    }

    #[test]
    fn cap_never_exceeded_while_moving() {
        let mut grid = StreamingGrid::new(GridConfig {
            cell_size: 100.0,
            render_distance: 1,
            max_resident: Some(12),
        })
        .unwrap();
        let mut scene = RecordingScene::new();

        for step in 0..20 {
            grid.set_player_position(Vec3::new(step as f32 * 60.0, 0.0, 0.0));
            grid.tick(&mut scene);
            assert!(grid.resident_count() <= 12);
            assert_eq!(scene.live_count(), grid.resident_count());
        }
    }

    #[test]
    fn biomes_are_assigned_on_load() {
        let mut grid = grid(100.0, 0);
        let mut scene = RecordingScene::new();
        grid.tick(&mut scene);
        let cell = grid.cell(CellCoord::new(0, 0)).unwrap();
        assert_eq!(cell.biome, Biome::Village);

        grid.set_player_position(Vec3::new(10_000.0, 0.0, 0.0));
        grid.tick(&mut scene);
        let cell = grid.cell(CellCoord::new(100, 0)).unwrap();
        assert_eq!(cell.biome, Biome::Desert);
    }

    #[test]
    fn set_player_position_alone_has_no_side_effects() {
        let mut grid = grid(100.0, 1);
        grid.set_player_position(Vec3::new(9000.0, 0.0, 9000.0));
        assert_eq!(grid.resident_count(), 0);
        assert_eq!(grid.player_cell(), CellCoord::new(90, 90));
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let result = StreamingGrid::new(GridConfig {
            cell_size: -1.0,
            ..GridConfig::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn stats_track_the_last_tick() {
        let mut grid = grid(100.0, 1);
        let mut scene = RecordingScene::new();
        grid.tick(&mut scene);
        assert_eq!(grid.stats().created_this_tick, 9);
        assert_eq!(grid.stats().resident, 9);

        grid.tick(&mut scene);
        assert_eq!(grid.stats().created_this_tick, 0);
        assert_eq!(grid.stats().resident, 9);
    }
}
