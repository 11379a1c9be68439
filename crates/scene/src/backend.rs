use std::collections::HashMap;

use wildreach_terrain::{SurfaceMesh, SurfaceStyle};

/// Opaque handle to a surface owned by the scene backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// Errors from scene backend operations.
///
/// Resource-creation failure is the only error class the streaming layer
/// has to handle: destruction is infallible and position reads are plain
/// value reads.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("surface allocation failed: {0}")]
    AllocationFailed(String),
}

/// The seam to the rendering engine.
///
/// The streaming grid drives the scene exclusively through this trait and
/// never touches engine state directly. `destroy_surface` releases
/// unconditionally; a handle passed to it must not be used again.
pub trait SceneBackend {
    /// Instantiate a surface in the scene with the given appearance.
    fn create_surface(
        &mut self,
        mesh: &SurfaceMesh,
        style: &SurfaceStyle,
    ) -> Result<SurfaceHandle, SceneError>;

    /// Release a surface previously returned by `create_surface`.
    fn destroy_surface(&mut self, handle: SurfaceHandle);
}

/// What the recording backend remembers about a live surface.
#[derive(Debug, Clone)]
pub struct SurfaceRecord {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub style: SurfaceStyle,
}

/// In-memory scene backend, a workaround for the real GPU engine.
///
/// Tracks live handles and create/destroy counts so tests and the CLI can
/// observe exactly what the streaming grid asked the engine to do. Tests
/// can queue creation failures to exercise the grid's retry path.
#[derive(Debug, Default)]
pub struct RecordingScene {
    next_handle: u64,
    live: HashMap<SurfaceHandle, SurfaceRecord>,
    created: usize,
    destroyed: usize,
    fail_queue: usize,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `n` creation failures ahead of the next successful create.
    pub fn fail_next(&mut self, n: usize) {
        self.fail_queue += n;
    }

    /// Number of surfaces currently alive.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total successful creations since construction.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Total destructions since construction.
    pub fn destroyed(&self) -> usize {
        self.destroyed
    }

    /// Record for a live surface, if the handle is alive.
    pub fn record(&self, handle: SurfaceHandle) -> Option<&SurfaceRecord> {
        self.live.get(&handle)
    }
}

impl SceneBackend for RecordingScene {
    fn create_surface(
        &mut self,
        mesh: &SurfaceMesh,
        style: &SurfaceStyle,
    ) -> Result<SurfaceHandle, SceneError> {
        if self.fail_queue > 0 {
            self.fail_queue -= 1;
            return Err(SceneError::AllocationFailed("injected failure".into()));
        }
        self.next_handle += 1;
        let handle = SurfaceHandle(self.next_handle);
        self.live.insert(
            handle,
            SurfaceRecord {
                vertex_count: mesh.vertex_count(),
                triangle_count: mesh.triangle_count(),
                style: *style,
            },
        );
        self.created += 1;
        Ok(handle)
    }

    fn destroy_surface(&mut self, handle: SurfaceHandle) {
        if self.live.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }
}
