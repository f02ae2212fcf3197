use crate::Vec2f;

/// Unit vector along `v`, or the zero vector when `v` has no direction.
///
/// Every behaviour in this crate relies on this policy: a degenerate
/// direction yields zero steering rather than NaN.
pub fn normalize_or_zero(v: &Vec2f) -> Vec2f {
    v.try_normalize(f64::EPSILON).unwrap_or_else(Vec2f::zeros)
}

/// Rescales `v` to `max` if it is longer, keeping its direction.
pub fn limit_magnitude(v: &Vec2f, max: f64) -> Vec2f {
    let magnitude = v.norm();
    if magnitude > max && magnitude > 0f64 {
        v * (max / magnitude)
    } else {
        *v
    }
}
