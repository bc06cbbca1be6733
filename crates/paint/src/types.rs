use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{CHANNEL_BYTE_SCALE, INTENSITY_EPSILON};

/// One of the four 8-bit channels carried per vertex.
///
/// Channels are independent paint masks. Every contribution records the
/// channel it was painted under and always writes back to that channel,
/// so reconfiguring a brush never rewrites history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum ColorChannel {
    #[default]
    Red = 0,
    Green = 1,
    Blue = 2,
    Alpha = 3,
}

impl ColorChannel {
    /// All channels in memory order.
    pub const ALL: [ColorChannel; 4] = [
        ColorChannel::Red,
        ColorChannel::Green,
        ColorChannel::Blue,
        ColorChannel::Alpha,
    ];

    /// Index of this channel within a [`VertexColor`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Per-vertex RGBA color with four independent 8-bit channels.
///
/// This struct is designed for GPU compatibility with bytemuck, so a whole
/// color array can be viewed as raw bytes for upload.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
#[repr(C)]
pub struct VertexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl VertexColor {
    /// Default for lazily-initialized override colors.
    pub const OPAQUE_BLACK: VertexColor = VertexColor::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Read one channel.
    #[inline]
    pub const fn channel(&self, channel: ColorChannel) -> u8 {
        match channel {
            ColorChannel::Red => self.r,
            ColorChannel::Green => self.g,
            ColorChannel::Blue => self.b,
            ColorChannel::Alpha => self.a,
        }
    }

    /// Write one channel, leaving the other three untouched.
    #[inline]
    pub fn set_channel(&mut self, channel: ColorChannel, value: u8) {
        match channel {
            ColorChannel::Red => self.r = value,
            ColorChannel::Green => self.g = value,
            ColorChannel::Blue => self.b = value,
            ColorChannel::Alpha => self.a = value,
        }
    }
}

/// Convert a normalized intensity total into an 8-bit channel value.
///
/// Clamped to [0, 1] and truncated, so 1.0 maps to 255 and 0.5 to 127.
#[inline]
pub fn intensity_to_byte(intensity: f32) -> u8 {
    (intensity.clamp(0.0, 1.0) * CHANNEL_BYTE_SCALE) as u8
}

/// View a color array as raw bytes for GPU upload.
pub fn colors_as_bytes(colors: &[VertexColor]) -> &[u8] {
    bytemuck::cast_slice(colors)
}

/// One timestamped unit of applied paint at a single vertex.
///
/// Contributions are immutable once created; the fade pass only ever drops
/// them. Remaining intensity is a pure function of the current simulation
/// time, so decay is independent of how often the fade pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintContribution {
    /// Post-falloff intensity at creation, expected range [0, 1]
    pub initial_intensity: f32,
    /// Simulation time at creation, in seconds
    pub time_painted: f32,
    /// Delay before decay begins, in seconds
    pub erase_after_seconds: f32,
    /// Duration of the ramp from full intensity to zero, in seconds
    pub fade_speed: f32,
    /// Channel this contribution writes to
    pub channel: ColorChannel,
}

impl PaintContribution {
    /// Intensity this contribution still carries at `now`.
    ///
    /// Full intensity until `erase_after_seconds` have elapsed since
    /// painting, then a linear ramp to zero over `fade_speed` seconds.
    pub fn remaining_intensity(&self, now: f32) -> f32 {
        let age = now - self.time_painted;
        if age < self.erase_after_seconds {
            return self.initial_intensity;
        }
        let fade_progress = ((age - self.erase_after_seconds) / self.fade_speed).clamp(0.0, 1.0);
        self.initial_intensity * (1.0 - fade_progress)
    }

    /// Whether the contribution has fully faded at `now`.
    pub fn is_expired(&self, now: f32) -> bool {
        self.remaining_intensity(now) <= INTENSITY_EPSILON
    }
}

/// One continuous brush gesture: start position, end position, and the
/// ordered intermediate positions in between.
///
/// Strokes are append-only history; nothing in the paint or fade algorithms
/// reads them back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaintStroke {
    pub start: Vec3,
    pub end: Vec3,
    pub positions: Vec<Vec3>,
}
