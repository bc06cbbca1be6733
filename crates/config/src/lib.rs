//! Shared configuration for Patina
//!
//! This crate provides the single source of truth for brush and fade
//! defaults shared between the core library and any host integration.
//! All values are plain data; the paint crate resolves them into its own
//! types at construction time.

use serde::{Deserialize, Serialize};

/// Default paint strength applied before falloff
pub const DEFAULT_PAINT_STRENGTH: f32 = 1.0;

/// Default brush radius in world units
pub const DEFAULT_PAINT_RADIUS: f32 = 100.0;

/// Default exponent applied to the linear distance falloff
pub const DEFAULT_FALLOFF_EXPONENT: f32 = 1.0;

/// Default detail level painted
pub const DEFAULT_LOD: u32 = 0;

/// Default delay before a contribution starts fading, in seconds
pub const DEFAULT_FADE_DURATION: f32 = 5.0;

/// Default duration of the fade ramp from full intensity to zero, in seconds
pub const DEFAULT_FADE_SPEED: f32 = 1.0;

/// Default minimum interval between fade passes, in seconds
pub const DEFAULT_UPDATE_INTERVAL: f32 = 0.1;

/// Brush defaults for paint application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Paint strength before falloff, expected range [0, 1]
    pub strength: f32,
    /// Brush radius in world units
    pub radius: f32,
    /// Exponent shaping the linear distance falloff
    pub falloff_exponent: f32,
    /// Detail level whose vertices are painted
    pub lod: u32,
    /// Delay before decay begins; values <= 0 select `fade_duration`
    pub erase_after_seconds: f32,
    /// Fade ramp duration; values <= 0 select [`DEFAULT_FADE_SPEED`]
    pub fade_speed: f32,
    /// Global fallback delay used when `erase_after_seconds` is <= 0
    pub fade_duration: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            strength: DEFAULT_PAINT_STRENGTH,
            radius: DEFAULT_PAINT_RADIUS,
            falloff_exponent: DEFAULT_FALLOFF_EXPONENT,
            lod: DEFAULT_LOD,
            erase_after_seconds: 0.0,
            fade_speed: DEFAULT_FADE_SPEED,
            fade_duration: DEFAULT_FADE_DURATION,
        }
    }
}

/// Fade pass scheduling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FadeConfig {
    /// Minimum interval between fade passes in seconds; 0 runs every tick
    pub update_interval: f32,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL,
        }
    }
}

/// Aggregate configuration for the painting system
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaintConfig {
    pub brush: BrushConfig,
    pub fade: FadeConfig,
}
