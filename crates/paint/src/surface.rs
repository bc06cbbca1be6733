//! Collaborator contracts for externally-owned mesh surfaces.
//!
//! The core never owns a surface. It keys paint state by [`SurfaceId`] and
//! re-resolves the surface through a [`SurfaceRegistry`] on every fade pass,
//! so a host is free to destroy or rebuild geometry between ticks.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::VertexColor;

/// Stable identity of an externally-owned surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

/// A paintable mesh surface owned by the host.
///
/// Implementations wrap whatever the host uses for geometry and vertex
/// color storage. `commit_colors` must be synchronous: any release, flush,
/// and reinitialization of the underlying GPU resource completes before it
/// returns, so a paint or fade pass observes a fully replaced buffer.
pub trait PaintSurface {
    /// Stable identity used to key paint state.
    fn id(&self) -> SurfaceId;

    /// Whether the surface still has underlying geometry.
    fn has_geometry(&self) -> bool;

    /// Number of renderable vertices at `lod`, or `None` when that detail
    /// level has no vertex data.
    fn vertex_count(&self, lod: u32) -> Option<u32>;

    /// Local-space position of one vertex. Only called with a `lod` for
    /// which `vertex_count` returned `Some` and `index` below that count.
    fn local_position(&self, lod: u32, index: u32) -> Vec3;

    /// Map a local-space position into world space.
    fn world_from_local(&self, local: Vec3) -> Vec3;

    /// Whether override colors exist and are initialized at `lod`.
    fn colors_initialized(&self, lod: u32) -> bool;

    /// Initialize override colors to opaque black, sized to `vertex_count`,
    /// if they are absent. Returns false when storage cannot be obtained.
    fn ensure_colors(&mut self, lod: u32, vertex_count: u32) -> bool;

    /// Snapshot of the current color array at `lod`.
    fn read_colors(&self, lod: u32) -> Option<Vec<VertexColor>>;

    /// Replace the color array at `lod`, including GPU-visible state.
    fn commit_colors(&mut self, lod: u32, colors: &[VertexColor]);

    /// Fire-and-forget notification that render state changed. Called only
    /// after colors actually changed.
    fn mark_render_dirty(&mut self);
}

/// Resolves live surfaces by id.
///
/// Returning `None` means the surface disappeared; the fade engine treats
/// that as ordinary lifecycle and prunes the associated paint state.
pub trait SurfaceRegistry {
    fn get_mut(&mut self, id: SurfaceId) -> Option<&mut dyn PaintSurface>;
}
