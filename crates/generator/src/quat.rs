//! Quaternion normalization
//!
//! Drawn orientation components only define a direction; the wire carries
//! unit quaternions. Component order is (x, y, z, w).

/// Draws with a norm below this are treated as degenerate.
const NORM_EPSILON: f32 = 1e-6;

/// Identity rotation in (x, y, z, w) order.
pub const IDENTITY: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Euclidean norm of the 4-vector.
pub fn norm(q: [f32; 4]) -> f32 {
    q.iter()
        .map(|component| component * component)
        .sum::<f32>()
        .sqrt()
}

/// Scale a quaternion to unit Euclidean norm.
///
/// A degenerate draw (norm below `1e-6`) yields the identity quaternion
/// instead of dividing by (near) zero.
pub fn normalize(q: [f32; 4]) -> [f32; 4] {
    let magnitude = norm(q);
    if magnitude < NORM_EPSILON {
        return IDENTITY;
    }
    q.map(|component| component / magnitude)
}
