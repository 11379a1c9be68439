//! Scene adapter: the seam between terrain streaming and the rendering
//! engine.
//!
//! # Invariants
//! - The streaming layer holds a surface only through an opaque handle.
//! - A destroyed handle is never reused by the caller.
//!
//! # Workaround
//! Ships an in-memory recording backend in place of the real engine. The
//! trait is stable; swap in an engine-backed implementation without
//! changing consumers.

mod backend;

pub use backend::{RecordingScene, SceneBackend, SceneError, SurfaceHandle, SurfaceRecord};
