/// Remaining intensity at or below this is treated as fully faded.
pub const INTENSITY_EPSILON: f32 = 1.0e-4;

/// Scale from normalized intensity to an 8-bit channel value.
pub const CHANNEL_BYTE_SCALE: f32 = 255.0;

/// Detail level whose color buffer the fade pass reads and commits.
pub const BASE_LOD: u32 = 0;
