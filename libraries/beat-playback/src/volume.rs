//! Volume control
//!
//! Volume is a linear gain in `[0, 1]`. Every entry point clamps before the
//! value reaches the audio backend.

/// Clamp a requested volume into `[0, 1]`
///
/// NaN maps to silence rather than propagating into the backend.
pub fn clamp_volume(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
