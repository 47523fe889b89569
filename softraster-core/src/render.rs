/// Per-face render driver: transform, light, rasterize
use log::{debug, warn};
use nalgebra::{Matrix4, Vector3};

use crate::color::Color;
use crate::error::RenderError;
use crate::framebuffer::{Canvas, DepthBuffer};
use crate::geometry::Mesh;
use crate::math::proj;
use crate::projection::{Camera, Viewport};
use crate::raster::{line, triangle};
use crate::transform::Transform;

/// Everything a single render needs, fixed for the whole run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub camera: Camera,
    pub viewport: Viewport,
    light_dir: Vector3<f32>,
}

impl RenderSettings {
    /// The light direction is normalized here; only its direction matters.
    pub fn new(camera: Camera, viewport: Viewport, light_dir: Vector3<f32>) -> Result<Self, RenderError> {
        let light_dir = light_dir
            .try_normalize(f32::EPSILON)
            .ok_or(RenderError::ZeroLight)?;
        Ok(Self {
            camera,
            viewport,
            light_dir,
        })
    }

    pub fn light_dir(&self) -> Vector3<f32> {
        self.light_dir
    }
}

/// Counters from one pass over a mesh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub faces: usize,
    pub drawn: usize,
    pub culled: usize,
    pub pixels: usize,
}

/// Flat-shaded triangle renderer with a precomposed mesh-to-screen matrix
pub struct Renderer {
    settings: RenderSettings,
    pipeline: Matrix4<f32>,
}

impl Renderer {
    pub fn new(settings: RenderSettings) -> Result<Self, RenderError> {
        let pipeline = settings.camera.pipeline(&settings.viewport)?;
        Ok(Self { settings, pipeline })
    }

    /// Rasterize every face facing the light.
    ///
    /// Faces are culled by light direction only, never by camera
    /// direction. Faces must be drawn in order so later ones see the depth
    /// written by earlier ones.
    pub fn render<C: Canvas>(&self, mesh: &Mesh, canvas: &mut C, depth: &mut DepthBuffer) -> RenderStats {
        let mut stats = RenderStats {
            faces: mesh.nfaces(),
            ..RenderStats::default()
        };

        for face in 0..mesh.nfaces() {
            let mut screen = [Vector3::zeros(); 3];
            for (nth, point) in screen.iter_mut().enumerate() {
                *point = Transform::to_screen(&self.pipeline, &mesh.vert_at(face, nth));
            }

            let intensity = self.intensity(mesh, face);
            if intensity > 0.0 {
                stats.drawn += 1;
                stats.pixels += triangle(&screen, depth, canvas, Color::gray_level(intensity));
            } else {
                stats.culled += 1;
            }
        }

        debug!(
            "rendered {} faces: {} drawn, {} culled, {} pixels",
            stats.faces, stats.drawn, stats.culled, stats.pixels
        );
        stats
    }

    /// Lambertian intensity of a face from its world-space normal.
    /// NaN (from a broken mesh) compares false and is culled by the caller.
    fn intensity(&self, mesh: &Mesh, face: usize) -> f32 {
        mesh.face_normal(face).dot(&self.settings.light_dir)
    }
}

/// Draw every face edge, mapping x and y from [-1, 1] straight to pixels.
pub fn render_wireframe<C: Canvas>(mesh: &Mesh, canvas: &mut C, color: Color) {
    if mesh.is_empty() {
        warn!("wireframe requested for an empty mesh");
        return;
    }
    let w = canvas.width() as f32;
    let h = canvas.height() as f32;
    let to_pixel = |i: usize| {
        let v = proj(&mesh.vert(i));
        (((v.x + 1.0) * w / 2.0) as i32, ((v.y + 1.0) * h / 2.0) as i32)
    };

    for face in 0..mesh.nfaces() {
        let indices = mesh.face(face);
        for j in 0..3 {
            let (x0, y0) = to_pixel(indices[j]);
            let (x1, y1) = to_pixel(indices[(j + 1) % 3]);
            line(x0, y0, x1, y1, canvas, color);
        }
    }
    debug!("drew {} wireframe faces", mesh.nfaces());
}
