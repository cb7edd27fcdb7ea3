//! Joint angle calculation using the dot product.
//!
//! Computes the angle at a joint (the vertex) from the vectors
//! vertex→a and vertex→c. For the elbow that is shoulder and wrist:
//! 180° is a fully extended arm (lockout), small angles a fully bent one.

/// Guard against division by zero when a vector has near-zero length.
const MAGNITUDE_EPSILON: f32 = 1e-6;

/// Calculates the angle at `vertex` in degrees, in [0, 180].
///
/// Uses the dot-product formula `cos(θ) = (v1 · v2) / (|v1| × |v2|)`.
/// The cosine is clamped to [-1, 1] before the arc-cosine so that
/// floating-point overshoot can never produce NaN. No confidence
/// filtering happens here; callers gate on confidence before calling.
#[must_use]
pub fn joint_angle(a: (f32, f32), vertex: (f32, f32), c: (f32, f32)) -> f32 {
    let v1 = (a.0 - vertex.0, a.1 - vertex.1);
    let v2 = (c.0 - vertex.0, c.1 - vertex.1);

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

    let cos_angle = (dot / (mag1 * mag2 + MAGNITUDE_EPSILON)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}
