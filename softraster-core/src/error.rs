/// Error types shared across the core crate
use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading a mesh from OBJ text
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: face has {corners} corners, the mesh must be triangulated")]
    NonTriangular { line: usize, corners: usize },
    #[error("line {line}: {kind} index {index} out of range (have {count})")]
    IndexOutOfRange {
        line: usize,
        kind: &'static str,
        index: i64,
        count: usize,
    },
}

/// Failures while building the render pipeline
#[derive(Error, Debug, PartialEq)]
pub enum RenderError {
    #[error("degenerate camera: {0}")]
    DegenerateCamera(&'static str),
    #[error("light direction must be non-zero")]
    ZeroLight,
}

/// Failures while writing the framebuffer to disk
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("unsupported image extension: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
