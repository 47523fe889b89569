/// Camera, projection and viewport matrices
use nalgebra::{Matrix4, Vector3, Vector4};

use crate::error::RenderError;
use crate::math::perspective_divide;

/// Depth range produced by the viewport transform: [0, DEPTH].
pub const DEPTH: f32 = 255.0;

/// Transform builder for the mesh-to-screen pipeline
pub struct Transform;

impl Transform {
    /// Build the world-to-camera matrix.
    ///
    /// The camera looks down -z. The rotation rows are the orthonormal camera
    /// basis, so the matrix is already the inverse of the camera frame and
    /// no general inversion is needed. Translation to the eye is applied
    /// first, then the rotation.
    pub fn look_at(
        eye: &Vector3<f32>,
        center: &Vector3<f32>,
        up: &Vector3<f32>,
    ) -> Result<Matrix4<f32>, RenderError> {
        let z = (eye - center)
            .try_normalize(f32::EPSILON)
            .ok_or(RenderError::DegenerateCamera("eye and center coincide"))?;
        let x = up
            .cross(&z)
            .try_normalize(f32::EPSILON)
            .ok_or(RenderError::DegenerateCamera("up is parallel to the view direction"))?;
        let y = z.cross(&x);

        let mut rotation = Matrix4::identity();
        for i in 0..3 {
            rotation[(0, i)] = x[i];
            rotation[(1, i)] = y[i];
            rotation[(2, i)] = z[i];
        }
        let translation = Matrix4::new_translation(&(-eye));

        Ok(rotation * translation)
    }

    /// Map the [-1,1]^3 cube onto the pixel rectangle `(x, y, w, h)` and
    /// depth onto [0, DEPTH].
    pub fn viewport(x: f32, y: f32, w: f32, h: f32) -> Matrix4<f32> {
        let mut m = Matrix4::identity();
        m[(0, 3)] = x + w / 2.0;
        m[(1, 3)] = y + h / 2.0;
        m[(2, 3)] = DEPTH / 2.0;

        m[(0, 0)] = w / 2.0;
        m[(1, 1)] = h / 2.0;
        m[(2, 2)] = DEPTH / 2.0;
        m
    }

    /// Perspective foreshortening for a camera at `distance` from its target.
    ///
    /// After multiplication w becomes `1 - z/distance`.
    pub fn projection(distance: f32) -> Matrix4<f32> {
        let mut m = Matrix4::identity();
        m[(3, 2)] = -1.0 / distance;
        m
    }

    /// Compose the full mesh-to-screen matrix. Applied right to left.
    pub fn compose(
        viewport: &Matrix4<f32>,
        projection: &Matrix4<f32>,
        model_view: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        viewport * projection * model_view
    }

    /// Transform a homogeneous point and perform the perspective divide.
    pub fn to_screen(m: &Matrix4<f32>, v: &Vector4<f32>) -> Vector3<f32> {
        perspective_divide(&(m * v))
    }
}
