//! Brush application onto mesh surfaces.
//!
//! A [`Brush`] visits every vertex of a surface, computes a distance-based
//! falloff against the hit point, records a timestamped contribution for
//! each vertex inside the radius, and writes the vertex's new channel total
//! into the surface's color array.

use glam::Vec3;
use tracing::{debug, warn};

use patina_config::{BrushConfig, DEFAULT_FADE_SPEED};

use crate::store::ContributionStore;
use crate::surface::PaintSurface;
use crate::types::{intensity_to_byte, ColorChannel, PaintContribution};

/// Error type for paint application.
///
/// Every variant leaves the contribution store and the surface untouched;
/// a failed call has no partial side effects.
#[derive(Debug, thiserror::Error)]
pub enum PaintError {
    #[error("surface has no underlying geometry")]
    MissingGeometry,
    #[error("no renderable vertex data at detail level {lod}")]
    MissingRenderData { lod: u32 },
    #[error("surface has zero vertices")]
    NoVertices,
    #[error("vertex color storage could not be obtained or initialized")]
    ColorStorage,
    #[error("color array holds {actual} entries for {expected} vertices")]
    ColorBufferMismatch { expected: u32, actual: usize },
}

/// Summary of one paint call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintReport {
    /// Number of vertices that received a new contribution
    pub vertices_painted: usize,
}

impl PaintReport {
    /// Whether the call was a no-op: valid geometry, nothing in radius.
    pub fn is_noop(&self) -> bool {
        self.vertices_painted == 0
    }
}

/// Brush parameters for paint application.
///
/// A brush is the complete argument set of a paint call. Hosts keep one
/// around and adjust fields between calls; every field has the configured
/// default.
#[derive(Debug, Clone)]
pub struct Brush {
    /// Paint strength before falloff, expected range [0, 1]
    pub strength: f32,
    /// Brush radius in world units
    pub radius: f32,
    /// Exponent shaping the linear distance falloff
    pub falloff_exponent: f32,
    /// Channel new contributions are painted under
    pub channel: ColorChannel,
    /// Detail level whose vertices are painted
    pub lod: u32,
    /// Delay before decay begins; values <= 0 select `fade_duration`
    pub erase_after_seconds: f32,
    /// Fade ramp duration; values <= 0 select the configured default
    pub fade_speed: f32,
    /// Global fallback delay used when `erase_after_seconds` is <= 0
    pub fade_duration: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self::from_config(&BrushConfig::default())
    }
}

impl Brush {
    /// Create a brush from configured defaults.
    pub fn from_config(config: &BrushConfig) -> Self {
        Self {
            strength: config.strength,
            radius: config.radius,
            falloff_exponent: config.falloff_exponent,
            channel: ColorChannel::default(),
            lod: config.lod,
            erase_after_seconds: config.erase_after_seconds,
            fade_speed: config.fade_speed,
            fade_duration: config.fade_duration,
        }
    }

    /// Distance falloff for this brush: a linear ramp from 1 at the hit
    /// point to 0 at the radius, shaped by the falloff exponent.
    pub fn falloff(&self, distance: f32) -> f32 {
        let linear = (1.0 - distance / self.radius).clamp(0.0, 1.0);
        linear.powf(self.falloff_exponent)
    }

    fn resolved_erase_after(&self) -> f32 {
        if self.erase_after_seconds > 0.0 {
            self.erase_after_seconds
        } else {
            self.fade_duration
        }
    }

    fn resolved_fade_speed(&self) -> f32 {
        if self.fade_speed > 0.0 {
            self.fade_speed
        } else {
            DEFAULT_FADE_SPEED
        }
    }

    /// Apply the brush at a world-space hit point.
    ///
    /// Visits every vertex at the brush's detail level, records a
    /// contribution for each vertex within the radius whose falloff-weighted
    /// strength is positive, and writes the vertex's new clamped channel
    /// total into the color array. The array is committed and render state
    /// marked dirty only when at least one vertex was affected; affecting
    /// none is an informational no-op, not an error.
    ///
    /// Validation precedes all mutation, so an `Err` means nothing changed.
    pub fn paint<S: PaintSurface>(
        &self,
        surface: &mut S,
        hit: Vec3,
        now: f32,
        store: &mut ContributionStore,
    ) -> Result<PaintReport, PaintError> {
        if !surface.has_geometry() {
            return Err(PaintError::MissingGeometry);
        }
        let vertex_count = surface
            .vertex_count(self.lod)
            .ok_or(PaintError::MissingRenderData { lod: self.lod })?;
        if vertex_count == 0 {
            return Err(PaintError::NoVertices);
        }

        if !surface.colors_initialized(self.lod) {
            warn!(
                surface = surface.id().0,
                lod = self.lod,
                "override colors absent, initializing to opaque black"
            );
        }
        if !surface.ensure_colors(self.lod, vertex_count) {
            return Err(PaintError::ColorStorage);
        }
        let mut colors = surface.read_colors(self.lod).ok_or(PaintError::ColorStorage)?;
        if colors.len() != vertex_count as usize {
            return Err(PaintError::ColorBufferMismatch {
                expected: vertex_count,
                actual: colors.len(),
            });
        }

        let id = surface.id();
        let erase_after = self.resolved_erase_after();
        let fade_speed = self.resolved_fade_speed();
        let mut vertices_painted = 0usize;

        for index in 0..vertex_count {
            let world = surface.world_from_local(surface.local_position(self.lod, index));
            let distance = world.distance(hit);
            if distance > self.radius {
                continue;
            }
            let final_strength = self.strength * self.falloff(distance);
            if final_strength <= 0.0 {
                continue;
            }

            store.add(
                id,
                index,
                PaintContribution {
                    initial_intensity: final_strength,
                    time_painted: now,
                    erase_after_seconds: erase_after,
                    fade_speed,
                    channel: self.channel,
                },
            );
            let total = store.channel_total(id, index, self.channel);
            colors[index as usize].set_channel(self.channel, intensity_to_byte(total));
            vertices_painted += 1;
        }

        if vertices_painted == 0 {
            debug!(surface = id.0, "no vertices within brush radius");
            return Ok(PaintReport { vertices_painted: 0 });
        }

        surface.commit_colors(self.lod, &colors);
        surface.mark_render_dirty();
        debug!(
            surface = id.0,
            vertices = vertices_painted,
            channel = ?self.channel,
            "painted"
        );
        Ok(PaintReport { vertices_painted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FixtureSurface;
    use crate::surface::SurfaceId;

    fn single_vertex_surface() -> FixtureSurface {
        FixtureSurface::new(1, vec![Vec3::ZERO])
    }

    #[test]
    fn test_falloff_monotonic_in_distance() {
        let brush = Brush {
            falloff_exponent: 2.0,
            ..Brush::default()
        };

        let mut previous = f32::INFINITY;
        for step in 0..=10 {
            let distance = brush.radius * step as f32 / 10.0;
            let falloff = brush.falloff(distance);
            assert!(falloff <= previous, "falloff increased at d={}", distance);
            previous = falloff;
        }
        assert_eq!(brush.falloff(0.0), 1.0);
        assert_eq!(brush.falloff(brush.radius), 0.0);
    }

    #[test]
    fn test_vertex_beyond_radius_untouched() {
        let mut surface = FixtureSurface::new(1, vec![Vec3::new(150.0, 0.0, 0.0)]);
        let mut store = ContributionStore::new();
        let brush = Brush::default();

        let report = brush.paint(&mut surface, Vec3::ZERO, 0.0, &mut store).unwrap();

        assert!(report.is_noop());
        assert!(store.is_empty());
        assert_eq!(surface.commits, 0);
        assert_eq!(surface.dirty_marks, 0);
    }

    #[test]
    fn test_paint_at_center_writes_full_byte() {
        let mut surface = single_vertex_surface();
        let mut store = ContributionStore::new();
        let brush = Brush::default();

        let report = brush.paint(&mut surface, Vec3::ZERO, 0.0, &mut store).unwrap();

        assert_eq!(report.vertices_painted, 1);
        let color = surface.color(0, 0).unwrap();
        assert_eq!(color.channel(ColorChannel::Red), 255);
        // Lazy initialization leaves untouched channels at opaque black
        assert_eq!(color.channel(ColorChannel::Green), 0);
        assert_eq!(color.channel(ColorChannel::Alpha), 255);
        assert_eq!(surface.commits, 1);
        assert_eq!(surface.dirty_marks, 1);
    }

    #[test]
    fn test_repeated_paint_clamps_total() {
        let mut surface = single_vertex_surface();
        let mut store = ContributionStore::new();
        let brush = Brush {
            strength: 0.6,
            ..Brush::default()
        };

        brush.paint(&mut surface, Vec3::ZERO, 0.0, &mut store).unwrap();
        brush.paint(&mut surface, Vec3::ZERO, 0.1, &mut store).unwrap();

        assert_eq!(store.contributions(SurfaceId(1), 0).unwrap().len(), 2);
        let color = surface.color(0, 0).unwrap();
        assert_eq!(color.channel(ColorChannel::Red), 255);
    }

    #[test]
    fn test_world_transform_applied_before_distance() {
        use glam::Affine3A;

        // Vertex at local origin, surface translated outside the radius
        let mut surface = FixtureSurface::new(1, vec![Vec3::ZERO])
            .with_transform(Affine3A::from_translation(Vec3::new(500.0, 0.0, 0.0)));
        let mut store = ContributionStore::new();
        let brush = Brush::default();

        let report = brush.paint(&mut surface, Vec3::ZERO, 0.0, &mut store).unwrap();
        assert!(report.is_noop());

        // Hitting the translated position paints it
        let report = brush
            .paint(&mut surface, Vec3::new(500.0, 0.0, 0.0), 0.0, &mut store)
            .unwrap();
        assert_eq!(report.vertices_painted, 1);
    }

    #[test]
    fn test_erase_after_defaults_to_fade_duration() {
        let mut surface = single_vertex_surface();
        let mut store = ContributionStore::new();
        let brush = Brush {
            erase_after_seconds: 0.0,
            fade_speed: -1.0,
            fade_duration: 7.5,
            ..Brush::default()
        };

        brush.paint(&mut surface, Vec3::ZERO, 0.0, &mut store).unwrap();

        let contribution = store.contributions(SurfaceId(1), 0).unwrap()[0];
        assert_eq!(contribution.erase_after_seconds, 7.5);
        assert_eq!(contribution.fade_speed, DEFAULT_FADE_SPEED);
    }

    #[test]
    fn test_missing_geometry_is_reported() {
        let mut surface = single_vertex_surface().without_geometry();
        let mut store = ContributionStore::new();

        let err = Brush::default()
            .paint(&mut surface, Vec3::ZERO, 0.0, &mut store)
            .unwrap_err();
        assert!(matches!(err, PaintError::MissingGeometry));
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_lod_is_reported() {
        let mut surface = single_vertex_surface();
        let mut store = ContributionStore::new();
        let brush = Brush {
            lod: 3,
            ..Brush::default()
        };

        let err = brush.paint(&mut surface, Vec3::ZERO, 0.0, &mut store).unwrap_err();
        assert!(matches!(err, PaintError::MissingRenderData { lod: 3 }));
    }

    #[test]
    fn test_zero_vertices_is_reported() {
        let mut surface = FixtureSurface::new(1, Vec::new());
        let mut store = ContributionStore::new();

        let err = Brush::default()
            .paint(&mut surface, Vec3::ZERO, 0.0, &mut store)
            .unwrap_err();
        assert!(matches!(err, PaintError::NoVertices));
    }

    #[test]
    fn test_color_storage_failure_is_reported() {
        let mut surface = single_vertex_surface();
        surface.fail_color_init = true;
        let mut store = ContributionStore::new();

        let err = Brush::default()
            .paint(&mut surface, Vec3::ZERO, 0.0, &mut store)
            .unwrap_err();
        assert!(matches!(err, PaintError::ColorStorage));
        assert!(store.is_empty());
    }
}
