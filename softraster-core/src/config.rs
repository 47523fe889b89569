/// Render configuration loaded from TOML
use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::color::Format;
use crate::projection::{Camera, Viewport};
use crate::render::{RenderSettings, Renderer};

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values that parse but cannot be rendered
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Pixel format names accepted in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    Grayscale,
    #[default]
    Rgb,
    Rgba,
}

impl From<PixelFormat> for Format {
    fn from(format: PixelFormat) -> Self {
        match format {
            PixelFormat::Grayscale => Format::Grayscale,
            PixelFormat::Rgb => Format::Rgb,
            PixelFormat::Rgba => Format::Rgba,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub center: [f32; 3],
    pub up: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            eye: camera.eye.into(),
            center: camera.center.into(),
            up: camera.up.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything that shapes one render, with defaults for every field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
    pub wireframe: bool,
    pub light: [f32; 3],
    pub camera: CameraConfig,
    /// Defaults to the middle three quarters of the image
    pub viewport: Option<ViewportConfig>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            format: PixelFormat::default(),
            wireframe: false,
            light: [0.0, 0.0, 1.0],
            camera: CameraConfig::default(),
            viewport: None,
        }
    }
}

impl RenderConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Validate and build the settings for a render.
    pub fn to_settings(&self) -> Result<RenderSettings, ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }

        let camera = Camera::new(
            Vector3::from(self.camera.eye),
            Vector3::from(self.camera.center),
            Vector3::from(self.camera.up),
        );
        let viewport = match self.viewport {
            Some(v) => Viewport::new(v.x, v.y, v.width, v.height),
            None => Viewport::centered(self.width, self.height),
        };
        let settings = RenderSettings::new(camera, viewport, Vector3::from(self.light))
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        // Surface camera problems now rather than at render time
        Renderer::new(settings).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(settings)
    }
}
