/// Camera and viewport configuration
use nalgebra::{Matrix4, Vector3};

use crate::error::RenderError;
use crate::transform::Transform;

/// Look-at camera with a single perspective foreshortening term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vector3<f32>,
    pub center: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    pub fn new(eye: Vector3<f32>, center: Vector3<f32>, up: Vector3<f32>) -> Self {
        Self { eye, center, up }
    }

    /// Distance from the eye to the look-at target
    pub fn distance(&self) -> f32 {
        (self.eye - self.center).norm()
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Result<Matrix4<f32>, RenderError> {
        Transform::look_at(&self.eye, &self.center, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Result<Matrix4<f32>, RenderError> {
        let distance = self.distance();
        if distance <= f32::EPSILON {
            return Err(RenderError::DegenerateCamera("eye and center coincide"));
        }
        Ok(Transform::projection(distance))
    }

    /// The composed mesh-to-screen matrix for a given viewport
    pub fn pipeline(&self, viewport: &Viewport) -> Result<Matrix4<f32>, RenderError> {
        let view = self.view_matrix()?;
        let projection = self.projection_matrix()?;
        Ok(Transform::compose(&viewport.matrix(), &projection, &view))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vector3::new(1.0, 1.0, 3.0),
            center: Vector3::zeros(),
            up: Vector3::new(0.0, 1.0, 0.0),
        }
    }
}

/// Target pixel rectangle of the viewport transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// A viewport covering the middle three quarters of an image
    pub fn centered(image_width: usize, image_height: usize) -> Self {
        let w = image_width as f32;
        let h = image_height as f32;
        Self::new(w / 8.0, h / 8.0, w * 3.0 / 4.0, h * 3.0 / 4.0)
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Transform::viewport(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::embed;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_default() {
        let camera = Camera::default();
        assert_relative_eq!(camera.distance(), 11.0f32.sqrt());
        assert!(camera.view_matrix().is_ok());
    }

    #[test]
    fn test_center_maps_to_viewport_center() {
        let viewport = Viewport::centered(800, 800);
        for eye in [
            Vector3::new(0.0, 0.0, 5.0),
            Vector3::new(1.0, 1.0, 3.0),
            Vector3::new(-2.0, 0.5, 1.0),
        ] {
            let center = Vector3::new(0.25, -0.5, 0.1);
            let camera = Camera::new(eye, center, Vector3::new(0.0, 1.0, 0.0));
            let m = camera.pipeline(&viewport).unwrap();
            let p = Transform::to_screen(&m, &embed(&center, 1.0));
            let (cx, cy) = viewport.center();
            assert_relative_eq!(p.x, cx, epsilon = 1e-3);
            assert_relative_eq!(p.y, cy, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_nearer_points_get_larger_depth() {
        let camera = Camera::new(
            Vector3::new(0.0, 0.0, 5.0),
            Vector3::zeros(),
            Vector3::new(0.0, 1.0, 0.0),
        );
        let m = camera.pipeline(&Viewport::centered(100, 100)).unwrap();
        let near = Transform::to_screen(&m, &embed(&Vector3::new(0.0, 0.0, 1.0), 1.0));
        let far = Transform::to_screen(&m, &embed(&Vector3::new(0.0, 0.0, -1.0), 1.0));
        assert!(near.z > far.z);
    }

    #[test]
    fn test_degenerate_camera_pipeline() {
        let p = Vector3::new(1.0, 1.0, 1.0);
        let camera = Camera::new(p, p, Vector3::new(0.0, 1.0, 0.0));
        assert!(camera.pipeline(&Viewport::centered(10, 10)).is_err());
    }
}
