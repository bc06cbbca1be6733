//! Timed decay of paint contributions across all tracked surfaces.
//!
//! The [`FadeEngine`] runs once per simulation tick (subject to its update
//! interval), ages every contribution against absolute timestamps, folds
//! what remains into per-channel vertex color totals, and prunes empty
//! state at all three levels: contribution list, vertex entry, surface
//! entry.

use tracing::debug;

use patina_config::FadeConfig;

use crate::constants::{BASE_LOD, INTENSITY_EPSILON};
use crate::store::ContributionStore;
use crate::surface::SurfaceRegistry;
use crate::types::{intensity_to_byte, ColorChannel};

/// Summary of one `advance` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FadeReport {
    /// Whether the pass was skipped by the update-interval throttle
    pub throttled: bool,
    /// Surfaces whose colors changed and were committed
    pub surfaces_committed: usize,
    /// Contributions dropped as fully faded
    pub contributions_dropped: usize,
    /// Vertex entries pruned, emptied or out of bounds
    pub vertices_pruned: usize,
    /// Surface entries pruned, stale or emptied
    pub surfaces_pruned: usize,
}

/// Ages contributions and writes surviving intensity back into vertex
/// colors.
///
/// A pass runs at most once per `update_interval` of simulation time; calls
/// inside the interval return immediately with `throttled` set. Throttling
/// never changes results because remaining intensity is computed from each
/// contribution's absolute timestamps, not from accumulated deltas. An
/// interval of zero runs every call.
#[derive(Debug)]
pub struct FadeEngine {
    update_interval: f32,
    last_run: Option<f32>,
}

impl FadeEngine {
    /// Engine with the given minimum interval between passes, in seconds.
    pub fn new(update_interval: f32) -> Self {
        Self {
            update_interval,
            last_run: None,
        }
    }

    /// Engine with the configured interval.
    pub fn from_config(config: &FadeConfig) -> Self {
        Self::new(config.update_interval)
    }

    pub fn update_interval(&self) -> f32 {
        self.update_interval
    }

    /// Run one decay pass over every tracked surface.
    ///
    /// Surfaces that have disappeared, lost their geometry, or lost their
    /// color storage are pruned silently; that is ordinary lifecycle, not an
    /// error. Each surface is committed at most once, and only when at least
    /// one channel byte actually changed, so passes inside a contribution's
    /// delay window cause no GPU churn. This never fails: per-surface work
    /// is independent and a malformed surface cannot block the others.
    pub fn advance<R: SurfaceRegistry>(
        &mut self,
        store: &mut ContributionStore,
        registry: &mut R,
        now: f32,
    ) -> FadeReport {
        let mut report = FadeReport::default();

        if let Some(last) = self.last_run {
            if now - last < self.update_interval {
                report.throttled = true;
                return report;
            }
        }
        self.last_run = Some(now);

        if store.is_empty() {
            return report;
        }

        for id in store.surface_ids() {
            let Some(surface) = registry.get_mut(id) else {
                store.remove_surface(id);
                report.surfaces_pruned += 1;
                debug!(surface = id.0, "surface gone, dropping its paint state");
                continue;
            };
            if !surface.has_geometry() || !surface.colors_initialized(BASE_LOD) {
                store.remove_surface(id);
                report.surfaces_pruned += 1;
                debug!(surface = id.0, "color storage unavailable, dropping its paint state");
                continue;
            }
            let Some(mut colors) = surface.read_colors(BASE_LOD) else {
                store.remove_surface(id);
                report.surfaces_pruned += 1;
                continue;
            };

            let mut changed = false;
            let Some(vertices) = store.vertices_mut(id) else {
                continue;
            };

            vertices.retain(|&index, contributions| {
                let Some(color) = colors.get_mut(index as usize) else {
                    // Mesh was rebuilt with fewer vertices since painting.
                    report.vertices_pruned += 1;
                    return false;
                };

                let mut totals = [0.0f32; 4];
                let mut touched = [false; 4];
                contributions.retain(|contribution| {
                    let slot = contribution.channel.index();
                    touched[slot] = true;
                    let remaining = contribution.remaining_intensity(now);
                    if remaining <= INTENSITY_EPSILON {
                        report.contributions_dropped += 1;
                        false
                    } else {
                        totals[slot] += remaining;
                        true
                    }
                });

                for channel in ColorChannel::ALL {
                    let slot = channel.index();
                    if !touched[slot] {
                        continue;
                    }
                    let mut total = totals[slot].clamp(0.0, 1.0);
                    if total <= INTENSITY_EPSILON {
                        total = 0.0;
                    }
                    let value = intensity_to_byte(total);
                    if color.channel(channel) != value {
                        color.set_channel(channel, value);
                        changed = true;
                    }
                }

                if contributions.is_empty() {
                    report.vertices_pruned += 1;
                    false
                } else {
                    true
                }
            });

            if changed {
                surface.commit_colors(BASE_LOD, &colors);
                surface.mark_render_dirty();
                report.surfaces_committed += 1;
            }
            if store.prune_surface_if_empty(id) {
                report.surfaces_pruned += 1;
            }
        }

        if report.contributions_dropped > 0 || report.surfaces_pruned > 0 {
            debug!(
                contributions = report.contributions_dropped,
                vertices = report.vertices_pruned,
                surfaces = report.surfaces_pruned,
                "fade pass pruned state"
            );
        }
        report
    }
}
