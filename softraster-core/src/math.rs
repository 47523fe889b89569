/// Small helpers on top of nalgebra's fixed-size vectors
use nalgebra::{Vector3, Vector4};

/// Append a fourth component to a 3D vector (1.0 for points, 0.0 for directions).
pub fn embed(v: &Vector3<f32>, fill: f32) -> Vector4<f32> {
    Vector4::new(v.x, v.y, v.z, fill)
}

/// Drop the fourth component.
pub fn proj(v: &Vector4<f32>) -> Vector3<f32> {
    v.xyz()
}

/// Divide a homogeneous vector by its own w and keep xyz.
///
/// A w of zero yields infinities, which the rasterizer rejects.
pub fn perspective_divide(v: &Vector4<f32>) -> Vector3<f32> {
    v.xyz() / v.w
}

/// Normalize, returning the zero vector instead of NaN for zero-length input.
pub fn normalize_or_zero(v: &Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
}
