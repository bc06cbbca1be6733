//! Complete paint/fade pipeline.
//!
//! [`PaintPipeline`] is the host-facing entry point. It owns the
//! contribution store, the active brush, the fade engine, and the stroke
//! log, and is driven by two calls from the host's update loop: `paint`
//! whenever a brush application lands, and `advance_fades` once per tick.

use glam::Vec3;

use patina_config::PaintConfig;

use crate::brush::{Brush, PaintError, PaintReport};
use crate::fade::{FadeEngine, FadeReport};
use crate::log::{RecorderError, StrokeLog, StrokeRecorder};
use crate::store::ContributionStore;
use crate::surface::{PaintSurface, SurfaceRegistry};

/// Owns all paint state for one host simulation.
///
/// Both operations run to completion synchronously and never concurrently;
/// the `&mut` receiver encodes the single-threaded access the data model
/// requires.
pub struct PaintPipeline {
    store: ContributionStore,
    brush: Brush,
    fade: FadeEngine,
    recorder: StrokeRecorder,
    log: StrokeLog,
}

impl PaintPipeline {
    /// Pipeline with default configuration.
    pub fn new() -> Self {
        Self::from_config(&PaintConfig::default())
    }

    /// Pipeline with the given brush and fade configuration.
    pub fn from_config(config: &PaintConfig) -> Self {
        Self {
            store: ContributionStore::new(),
            brush: Brush::from_config(&config.brush),
            fade: FadeEngine::from_config(&config.fade),
            recorder: StrokeRecorder::new(),
            log: StrokeLog::new(),
        }
    }

    /// The active brush.
    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    /// Mutable access to the active brush, for hosts adjusting parameters
    /// between applications.
    pub fn brush_mut(&mut self) -> &mut Brush {
        &mut self.brush
    }

    /// The contribution store.
    pub fn store(&self) -> &ContributionStore {
        &self.store
    }

    /// The stroke log.
    pub fn log(&self) -> &StrokeLog {
        &self.log
    }

    /// Apply the active brush to a surface at a world-space hit point.
    pub fn paint<S: PaintSurface>(
        &mut self,
        surface: &mut S,
        hit: Vec3,
        now: f32,
    ) -> Result<PaintReport, PaintError> {
        self.brush.paint(surface, hit, now, &mut self.store)
    }

    /// Run the fade pass over every tracked surface.
    pub fn advance_fades<R: SurfaceRegistry>(&mut self, registry: &mut R, now: f32) -> FadeReport {
        self.fade.advance(&mut self.store, registry, now)
    }

    /// Whether a gesture is currently being recorded.
    pub fn is_stroking(&self) -> bool {
        self.recorder.is_recording()
    }

    /// Record a gesture position, starting a stroke if none is active.
    pub fn record_stroke_point(&mut self, position: Vec3) {
        self.recorder.extend(position);
    }

    /// Finish the active gesture and append it to the log.
    pub fn end_stroke(&mut self, end: Vec3) -> Result<(), RecorderError> {
        let stroke = self.recorder.finish(end)?;
        self.log.append(stroke);
        Ok(())
    }
}

impl Default for PaintPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{FixtureRegistry, FixtureSurface};
    use crate::types::ColorChannel;
    use patina_config::{BrushConfig, FadeConfig};

    #[test]
    fn test_from_config_wires_brush_and_fade() {
        let config = PaintConfig {
            brush: BrushConfig {
                radius: 25.0,
                ..BrushConfig::default()
            },
            fade: FadeConfig {
                update_interval: 0.5,
            },
        };
        let pipeline = PaintPipeline::from_config(&config);
        assert_eq!(pipeline.brush().radius, 25.0);
    }

    #[test]
    fn test_paint_then_fade_through_facade() {
        let mut registry = FixtureRegistry::new();
        let id = registry.insert(FixtureSurface::new(1, vec![Vec3::ZERO]));

        let mut pipeline = PaintPipeline::from_config(&PaintConfig {
            fade: FadeConfig {
                update_interval: 0.0,
            },
            ..PaintConfig::default()
        });

        let report = pipeline
            .paint(registry.surface_mut(id).unwrap(), Vec3::ZERO, 0.0)
            .unwrap();
        assert_eq!(report.vertices_painted, 1);

        // Default delay is 5s and default ramp 1s, so by 7s it is gone
        let report = pipeline.advance_fades(&mut registry, 7.0);
        assert_eq!(report.contributions_dropped, 1);
        assert!(pipeline.store().is_empty());
        let color = registry.surface(id).unwrap().color(0, 0).unwrap();
        assert_eq!(color.channel(ColorChannel::Red), 0);
    }

    #[test]
    fn test_stroke_recording_through_facade() {
        let mut pipeline = PaintPipeline::new();
        assert!(!pipeline.is_stroking());

        pipeline.record_stroke_point(Vec3::ZERO);
        pipeline.record_stroke_point(Vec3::ONE);
        assert!(pipeline.is_stroking());

        pipeline.end_stroke(Vec3::splat(2.0)).unwrap();
        assert!(!pipeline.is_stroking());
        assert_eq!(pipeline.log().len(), 1);
        assert_eq!(pipeline.log().strokes()[0].positions.len(), 2);
    }
}
