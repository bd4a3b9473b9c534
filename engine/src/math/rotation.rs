//! Yaw to marker rotation quantization

use crate::core::ROTATION_MASK;
use once_cell::sync::Lazy;

/// Angular width of one marker facing
pub const DEGREES_PER_ROTATION: f32 = 22.5;

/// Marker rotation for every whole degree in `0..360`
static ROTATION_LOOKUP: Lazy<[u8; 360]> = Lazy::new(|| {
    let mut table = [0u8; 360];
    for (degree, rotation) in table.iter_mut().enumerate() {
        *rotation = rotation_for_degree(degree as i32);
    }
    table
});

fn rotation_for_degree(degree: i32) -> u8 {
    ((degree as f32 / DEGREES_PER_ROTATION).round() as i32 & ROTATION_MASK as i32) as u8
}

/// Wrap an angle into `[-180, 180)`
pub fn wrap_degrees(degrees: f32) -> f32 {
    let mut wrapped = degrees % 360.0;
    if wrapped >= 180.0 {
        wrapped -= 360.0;
    }
    if wrapped < -180.0 {
        wrapped += 360.0;
    }
    wrapped
}

/// Convert a player yaw in degrees to a marker rotation in `0..=15`
///
/// The yaw is wrapped, truncated to a whole degree and shifted into
/// `0..360` before the table lookup. Non-finite yaws map to rotation 0.
pub fn map_yaw_to_rotation(yaw: f32) -> u8 {
    let degree = (wrap_degrees(yaw) as i32 + 360) % 360;
    ROTATION_LOOKUP[degree as usize]
}
