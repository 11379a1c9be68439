use glam::Vec3;
use wildreach_common::CellCoord;

use crate::Heightfield;

/// CPU-side triangle mesh for one cell surface.
///
/// Vertices are laid out row-major over a `(resolution + 1)²` grid.
/// Positions are absolute world space, so the engine uploads them without a
/// per-cell transform.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Build the surface mesh for one cell.
///
/// The surface spans `cell_size × cell_size` world units with `resolution`
/// quads per edge. Resolution is constant regardless of distance from the
/// player; every vertex height is sampled from the heightfield at the
/// vertex's absolute world position.
pub fn build_cell_surface(
    coord: CellCoord,
    cell_size: f32,
    resolution: u32,
    field: &Heightfield,
) -> SurfaceMesh {
    assert!(resolution > 0, "resolution must be at least one quad");
    let origin = coord.origin(cell_size);
    let side = resolution + 1;
    let step = cell_size / resolution as f32;

    let mut positions = Vec::with_capacity((side * side) as usize);
    let mut normals = Vec::with_capacity((side * side) as usize);
    for row in 0..side {
        for col in 0..side {
            let wx = origin.x + col as f32 * step;
            let wz = origin.z + row as f32 * step;
            positions.push([wx, field.height(wx, wz), wz]);
            normals.push(vertex_normal(field, wx, wz, step));
        }
    }

    let mut indices = Vec::with_capacity((resolution * resolution * 6) as usize);
    for row in 0..resolution {
        for col in 0..resolution {
            let a = row * side + col;
            let b = a + 1;
            let c = a + side;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    SurfaceMesh {
        positions,
        normals,
        indices,
    }
}

/// Central-difference normal of the heightfield at a world position.
fn vertex_normal(field: &Heightfield, x: f32, z: f32, step: f32) -> [f32; 3] {
    let dx = field.height(x + step, z) - field.height(x - step, z);
    let dz = field.height(x, z + step) - field.height(x, z - step);
    let n = Vec3::new(-dx, 2.0 * step, -dz).normalize();
    [n.x, n.y, n.z]
}
