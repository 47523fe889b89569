/// softraster core - a small software rasterizer
///
/// This library provides the rendering pipeline: look-at camera,
/// perspective projection and viewport matrices, barycentric triangle
/// fill with a depth buffer, Bresenham lines, and an OBJ mesh loader.

pub mod color;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod math;
pub mod obj;
pub mod projection;
pub mod raster;
pub mod render;
pub mod transform;

// Re-export commonly used types
pub use color::{Color, Format};
pub use config::{ConfigError, RenderConfig};
pub use error::{ImageError, MeshError, RenderError};
pub use framebuffer::{Canvas, DepthBuffer, Framebuffer};
pub use geometry::{Corner, Mesh};
pub use obj::{load_obj, parse_obj};
pub use projection::{Camera, Viewport};
pub use render::{render_wireframe, RenderSettings, RenderStats, Renderer};
pub use transform::Transform;
