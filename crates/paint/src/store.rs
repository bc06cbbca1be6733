//! Sparse two-level store of paint contributions.

use std::collections::HashMap;

use crate::surface::SurfaceId;
use crate::types::{ColorChannel, PaintContribution};

/// Contribution lists for one surface, keyed by vertex index.
pub type VertexContributions = HashMap<u32, Vec<PaintContribution>>;

/// Mapping from surface identity to per-vertex contribution lists.
///
/// Invariant: both map levels are pruned eagerly. No vertex index maps to an
/// empty list, and no surface key exists without at least one tracked
/// vertex. Insertion order within a list is preserved, though results only
/// depend on sums.
#[derive(Debug, Default)]
pub struct ContributionStore {
    surfaces: HashMap<SurfaceId, VertexContributions>,
}

impl ContributionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any surface has live contributions.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Number of tracked surfaces.
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Number of vertices tracked for one surface.
    pub fn tracked_vertices(&self, id: SurfaceId) -> usize {
        self.surfaces.get(&id).map_or(0, HashMap::len)
    }

    /// Total contributions tracked for one surface.
    pub fn contribution_count(&self, id: SurfaceId) -> usize {
        self.surfaces
            .get(&id)
            .map_or(0, |vertices| vertices.values().map(Vec::len).sum())
    }

    /// Append a contribution, creating surface and vertex entries on demand.
    pub fn add(&mut self, id: SurfaceId, vertex: u32, contribution: PaintContribution) {
        self.surfaces
            .entry(id)
            .or_default()
            .entry(vertex)
            .or_default()
            .push(contribution);
    }

    /// Contributions recorded for one vertex, if any.
    pub fn contributions(&self, id: SurfaceId, vertex: u32) -> Option<&[PaintContribution]> {
        self.surfaces
            .get(&id)?
            .get(&vertex)
            .map(Vec::as_slice)
    }

    /// Clamped total of initial intensities one channel carries at a vertex.
    pub fn channel_total(&self, id: SurfaceId, vertex: u32, channel: ColorChannel) -> f32 {
        let total: f32 = self
            .contributions(id, vertex)
            .unwrap_or(&[])
            .iter()
            .filter(|c| c.channel == channel)
            .map(|c| c.initial_intensity)
            .sum();
        total.clamp(0.0, 1.0)
    }

    /// Snapshot of tracked surface ids, for iteration that mutates the store.
    pub fn surface_ids(&self) -> Vec<SurfaceId> {
        self.surfaces.keys().copied().collect()
    }

    /// Mutable access to one surface's vertex map.
    pub fn vertices_mut(&mut self, id: SurfaceId) -> Option<&mut VertexContributions> {
        self.surfaces.get_mut(&id)
    }

    /// Drop all paint state for one surface. Returns whether it existed.
    pub fn remove_surface(&mut self, id: SurfaceId) -> bool {
        self.surfaces.remove(&id).is_some()
    }

    /// Drop the surface entry if it no longer tracks any vertex.
    /// Returns whether an entry was removed.
    pub fn prune_surface_if_empty(&mut self, id: SurfaceId) -> bool {
        match self.surfaces.get(&id) {
            Some(vertices) if vertices.is_empty() => {
                self.surfaces.remove(&id);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contribution(intensity: f32, channel: ColorChannel) -> PaintContribution {
        PaintContribution {
            initial_intensity: intensity,
            time_painted: 0.0,
            erase_after_seconds: 5.0,
            fade_speed: 1.0,
            channel,
        }
    }

    #[test]
    fn test_add_creates_nested_entries() {
        let mut store = ContributionStore::new();
        let id = SurfaceId(1);
        assert!(store.is_empty());

        store.add(id, 3, contribution(0.5, ColorChannel::Red));
        store.add(id, 3, contribution(0.25, ColorChannel::Red));
        store.add(id, 7, contribution(1.0, ColorChannel::Green));

        assert_eq!(store.surface_count(), 1);
        assert_eq!(store.tracked_vertices(id), 2);
        assert_eq!(store.contribution_count(id), 3);
        assert_eq!(store.contributions(id, 3).unwrap().len(), 2);
    }

    #[test]
    fn test_channel_total_sums_only_matching_channel() {
        let mut store = ContributionStore::new();
        let id = SurfaceId(1);
        store.add(id, 0, contribution(0.3, ColorChannel::Red));
        store.add(id, 0, contribution(0.2, ColorChannel::Red));
        store.add(id, 0, contribution(0.9, ColorChannel::Blue));

        assert!((store.channel_total(id, 0, ColorChannel::Red) - 0.5).abs() < 1e-6);
        assert!((store.channel_total(id, 0, ColorChannel::Blue) - 0.9).abs() < 1e-6);
        assert_eq!(store.channel_total(id, 0, ColorChannel::Alpha), 0.0);
    }

    #[test]
    fn test_channel_total_clamps_to_one() {
        let mut store = ContributionStore::new();
        let id = SurfaceId(1);
        store.add(id, 0, contribution(0.6, ColorChannel::Red));
        store.add(id, 0, contribution(0.6, ColorChannel::Red));

        assert_eq!(store.channel_total(id, 0, ColorChannel::Red), 1.0);
    }

    #[test]
    fn test_missing_entries_total_zero() {
        let store = ContributionStore::new();
        assert_eq!(store.channel_total(SurfaceId(9), 0, ColorChannel::Red), 0.0);
        assert!(store.contributions(SurfaceId(9), 0).is_none());
    }

    #[test]
    fn test_prune_surface_if_empty() {
        let mut store = ContributionStore::new();
        let id = SurfaceId(1);
        store.add(id, 0, contribution(1.0, ColorChannel::Red));

        // Non-empty surfaces are left alone
        assert!(!store.prune_surface_if_empty(id));

        store.vertices_mut(id).unwrap().clear();
        assert!(store.prune_surface_if_empty(id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_surface() {
        let mut store = ContributionStore::new();
        let id = SurfaceId(1);
        store.add(id, 0, contribution(1.0, ColorChannel::Red));

        assert!(store.remove_surface(id));
        assert!(!store.remove_surface(id));
        assert!(store.is_empty());
    }
}
