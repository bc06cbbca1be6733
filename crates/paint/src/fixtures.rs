//! In-memory implementations of the collaborator traits.
//!
//! Kept in the library rather than under `tests/` so unit tests, the
//! integration suite, and downstream experiments share one implementation
//! of the surface contract.

use std::collections::HashMap;

use glam::{Affine3A, Vec3};

use crate::surface::{PaintSurface, SurfaceId, SurfaceRegistry};
use crate::types::VertexColor;

/// An in-memory paintable surface.
///
/// Vertex positions are stored per detail level; colors are created lazily
/// through `ensure_colors` exactly as a host-owned buffer would be. Commit
/// and render-dirty calls are counted so tests can assert on GPU churn.
#[derive(Debug, Clone)]
pub struct FixtureSurface {
    id: SurfaceId,
    /// Local vertex positions, one Vec per detail level
    lods: Vec<Vec<Vec3>>,
    transform: Affine3A,
    colors: HashMap<u32, Vec<VertexColor>>,
    has_geometry: bool,
    /// When set, `ensure_colors` reports failure
    pub fail_color_init: bool,
    /// Number of `commit_colors` calls observed
    pub commits: usize,
    /// Number of `mark_render_dirty` calls observed
    pub dirty_marks: usize,
}

impl FixtureSurface {
    /// Surface with a single detail level and identity transform.
    pub fn new(id: u64, positions: Vec<Vec3>) -> Self {
        Self {
            id: SurfaceId(id),
            lods: vec![positions],
            transform: Affine3A::IDENTITY,
            colors: HashMap::new(),
            has_geometry: true,
            fail_color_init: false,
            commits: 0,
            dirty_marks: 0,
        }
    }

    /// Set the local-to-world transform.
    pub fn with_transform(mut self, transform: Affine3A) -> Self {
        self.transform = transform;
        self
    }

    /// Append an extra detail level.
    pub fn with_lod(mut self, positions: Vec<Vec3>) -> Self {
        self.lods.push(positions);
        self
    }

    /// Surface whose underlying geometry has been destroyed.
    pub fn without_geometry(mut self) -> Self {
        self.has_geometry = false;
        self
    }

    /// Simulate a mesh rebuild that leaves fewer vertices at level 0.
    /// The color buffer is re-sized to match, as a host rebuild would.
    pub fn shrink_to(&mut self, count: usize) {
        self.lods[0].truncate(count);
        if let Some(colors) = self.colors.get_mut(&0) {
            colors.truncate(count);
        }
    }

    /// Current colors at one detail level.
    pub fn colors(&self, lod: u32) -> Option<&[VertexColor]> {
        self.colors.get(&lod).map(Vec::as_slice)
    }

    /// Color of one vertex at one detail level.
    pub fn color(&self, lod: u32, index: u32) -> Option<VertexColor> {
        self.colors.get(&lod)?.get(index as usize).copied()
    }
}

impl PaintSurface for FixtureSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn has_geometry(&self) -> bool {
        self.has_geometry
    }

    fn vertex_count(&self, lod: u32) -> Option<u32> {
        self.lods.get(lod as usize).map(|positions| positions.len() as u32)
    }

    fn local_position(&self, lod: u32, index: u32) -> Vec3 {
        self.lods[lod as usize][index as usize]
    }

    fn world_from_local(&self, local: Vec3) -> Vec3 {
        self.transform.transform_point3(local)
    }

    fn colors_initialized(&self, lod: u32) -> bool {
        self.colors.contains_key(&lod)
    }

    fn ensure_colors(&mut self, lod: u32, vertex_count: u32) -> bool {
        if self.fail_color_init {
            return false;
        }
        self.colors
            .entry(lod)
            .or_insert_with(|| vec![VertexColor::OPAQUE_BLACK; vertex_count as usize]);
        true
    }

    fn read_colors(&self, lod: u32) -> Option<Vec<VertexColor>> {
        self.colors.get(&lod).cloned()
    }

    fn commit_colors(&mut self, lod: u32, colors: &[VertexColor]) {
        self.colors.insert(lod, colors.to_vec());
        self.commits += 1;
    }

    fn mark_render_dirty(&mut self) {
        self.dirty_marks += 1;
    }
}

/// Registry over fixture surfaces.
///
/// Removing a surface simulates the host destroying it between ticks.
#[derive(Debug, Default)]
pub struct FixtureRegistry {
    surfaces: HashMap<SurfaceId, FixtureSurface>,
}

impl FixtureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a surface and return its id.
    pub fn insert(&mut self, surface: FixtureSurface) -> SurfaceId {
        let id = surface.id;
        self.surfaces.insert(id, surface);
        id
    }

    /// Destroy a surface, as the host would between ticks.
    pub fn remove(&mut self, id: SurfaceId) -> Option<FixtureSurface> {
        self.surfaces.remove(&id)
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&FixtureSurface> {
        self.surfaces.get(&id)
    }

    pub fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut FixtureSurface> {
        self.surfaces.get_mut(&id)
    }
}

impl SurfaceRegistry for FixtureRegistry {
    fn get_mut(&mut self, id: SurfaceId) -> Option<&mut dyn PaintSurface> {
        self.surfaces
            .get_mut(&id)
            .map(|surface| surface as &mut dyn PaintSurface)
    }
}
