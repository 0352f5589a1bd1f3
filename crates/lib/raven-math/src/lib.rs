mod sh;
mod color;

pub use glam::{Vec3, DVec3};
pub use sh::{SHBasis9, factorial, truncated_cosine};
pub use color::ColorAccess;

/// Largest representable value strictly below `value` (for positive finite `value`).
#[inline]
pub fn next_below(value: f64) -> f64 {
    debug_assert!(value.is_finite());

    if value > 0.0 {
        f64::from_bits(value.to_bits() - 1)
    } else if value == 0.0 {
        -f64::from_bits(1)
    } else {
        f64::from_bits(value.to_bits() + 1)
    }
}
