/// Pixel and depth buffers written by the rasterizer
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use log::info;

use crate::color::{Color, Format};
use crate::error::ImageError;

/// Anything the rasterizer and line drawer can paint into.
///
/// Row 0 is the bottom row.
pub trait Canvas {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Read a pixel; out-of-bounds reads return the default color.
    fn get(&self, x: i32, y: i32) -> Color;

    /// Write a pixel; out-of-bounds writes are ignored and return false.
    fn set(&mut self, x: i32, y: i32, color: Color) -> bool;

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }
}

/// An in-memory image of `width * height` pixels in a fixed format
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    format: Format,
    data: Vec<u8>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize, format: Format) -> Self {
        Self {
            width,
            height,
            format,
            data: vec![0; width * height * format.bytes_per_pixel()],
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_format(self.format);
        let bpp = self.format.bytes_per_pixel();
        for pixel in self.data.chunks_exact_mut(bpp) {
            pixel.copy_from_slice(&bytes[..bpp]);
        }
    }

    pub fn flip_vertically(&mut self) {
        let row = self.width * self.format.bytes_per_pixel();
        for y in 0..self.height / 2 {
            let (top, bottom) = self.data.split_at_mut((self.height - 1 - y) * row);
            top[y * row..(y + 1) * row].swap_with_slice(&mut bottom[..row]);
        }
    }

    pub fn flip_horizontally(&mut self) {
        let bpp = self.format.bytes_per_pixel();
        let row = self.width * bpp;
        for line in self.data.chunks_exact_mut(row.max(1)) {
            for x in 0..self.width / 2 {
                let (left, right) = line.split_at_mut((self.width - 1 - x) * bpp);
                left[x * bpp..(x + 1) * bpp].swap_with_slice(&mut right[..bpp]);
            }
        }
    }

    /// Convert to an `image` buffer, rows in stored order.
    pub fn to_image(&self) -> DynamicImage {
        let (w, h) = (self.width as u32, self.height as u32);
        let at = |x: u32, y: u32| self.get(x as i32, y as i32);
        match self.format {
            Format::Grayscale => {
                DynamicImage::ImageLuma8(GrayImage::from_fn(w, h, |x, y| Luma([at(x, y).bgra()[0]])))
            }
            Format::Rgb => DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
                let c = at(x, y);
                Rgb([c.r(), c.g(), c.b()])
            })),
            Format::Rgba => DynamicImage::ImageRgba8(RgbaImage::from_fn(w, h, |x, y| {
                let c = at(x, y);
                Rgba([c.r(), c.g(), c.b(), c.a()])
            })),
        }
    }

    /// Write the image to `path`; the format follows the extension (tga or png).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageError> {
        let path = path.as_ref();
        let format = match ImageFormat::from_path(path) {
            Ok(f @ (ImageFormat::Tga | ImageFormat::Png)) => f,
            _ => return Err(ImageError::UnsupportedFormat(path.to_path_buf())),
        };
        // Files are stored top row first
        let mut flipped = self.clone();
        flipped.flip_vertically();
        flipped.to_image().save_with_format(path, format)?;
        info!(
            "wrote {}x{} {:?} image to {}",
            self.width,
            self.height,
            self.format,
            path.display()
        );
        Ok(())
    }

    fn offset(&self, x: i32, y: i32) -> usize {
        (y as usize * self.width + x as usize) * self.format.bytes_per_pixel()
    }
}

impl Canvas for Framebuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get(&self, x: i32, y: i32) -> Color {
        if !self.contains(x, y) {
            return Color::default();
        }
        let bpp = self.format.bytes_per_pixel();
        let i = self.offset(x, y);
        Color::from_bytes(&self.data[i..i + bpp], bpp)
    }

    fn set(&mut self, x: i32, y: i32, color: Color) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let bpp = self.format.bytes_per_pixel();
        let i = self.offset(x, y);
        self.data[i..i + bpp].copy_from_slice(&color.to_format(self.format)[..bpp]);
        true
    }
}

/// Per-pixel depth, larger values are closer to the camera
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![f32::NEG_INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.data.fill(f32::NEG_INFINITY);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        (x < self.width && y < self.height).then(|| self.data[y * self.width + x])
    }

    /// Store `z` if it is strictly greater than the current value.
    pub fn test_and_set(&mut self, x: usize, y: usize, z: f32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let slot = &mut self.data[y * self.width + x];
        if z > *slot {
            *slot = z;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_formats() {
        for format in [Format::Grayscale, Format::Rgb, Format::Rgba] {
            let mut fb = Framebuffer::new(4, 3, format);
            assert_eq!(fb.format(), format);
            assert!(fb.set(1, 2, Color::WHITE));
            assert!(!fb.set(4, 0, Color::WHITE));
            assert!(!fb.set(-1, 0, Color::WHITE));
            assert_eq!(fb.get(1, 2).bytespp(), format.bytes_per_pixel());
            assert_eq!(fb.get(1, 2).bgra()[0], 255);
            assert_eq!(fb.get(0, 0).bgra()[0], 0);
        }
    }

    #[test]
    fn test_flip_vertically() {
        let mut fb = Framebuffer::new(2, 3, Format::Rgb);
        fb.set(0, 0, Color::RED);
        fb.set(1, 1, Color::WHITE);
        fb.flip_vertically();
        let rgb = |c: Color| (c.r(), c.g(), c.b());
        assert_eq!(rgb(fb.get(0, 2)), (255, 0, 0));
        assert_eq!(rgb(fb.get(1, 1)), (255, 255, 255));
        assert_eq!(fb.get(0, 0), Color::from_bytes(&[0, 0, 0], 3));
    }

    #[test]
    fn test_flip_horizontally() {
        let mut fb = Framebuffer::new(3, 1, Format::Grayscale);
        fb.set(0, 0, Color::gray(9));
        fb.flip_horizontally();
        assert_eq!(fb.get(2, 0), Color::gray(9));
        assert_eq!(fb.get(0, 0), Color::gray(0));
    }

    #[test]
    fn test_to_image_channels() {
        let mut fb = Framebuffer::new(2, 2, Format::Rgba);
        fb.set(1, 0, Color::rgba(1, 2, 3, 4));
        let img = fb.to_image().to_rgba8();
        assert_eq!(img.get_pixel(1, 0), &Rgba([1, 2, 3, 4]));
        assert_eq!(img.get_pixel(0, 1), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_save_rejects_unknown_extension() {
        let fb = Framebuffer::new(1, 1, Format::Rgb);
        let path = std::env::temp_dir().join("softraster-unsupported.xyz");
        assert!(matches!(fb.save(&path), Err(ImageError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_save_tga() {
        let mut fb = Framebuffer::new(3, 2, Format::Rgb);
        fb.clear(Color::RED);
        fb.set(0, 0, Color::WHITE);
        let path = std::env::temp_dir().join("softraster-framebuffer-test.tga");
        fb.save(&path).unwrap();
        let read = image::open(&path).unwrap().to_rgb8();
        assert_eq!(read.dimensions(), (3, 2));
        // Bottom-left in framebuffer space is the last row of the file
        assert_eq!(read.get_pixel(0, 1), &Rgb([255, 255, 255]));
        assert_eq!(read.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(read.get_pixel(2, 1), &Rgb([255, 0, 0]));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_depth_buffer_keeps_maximum() {
        let mut depth = DepthBuffer::new(2, 2);
        assert_eq!(depth.get(1, 1), Some(f32::NEG_INFINITY));
        assert!(depth.test_and_set(1, 1, -100.0));
        assert!(!depth.test_and_set(1, 1, -200.0));
        assert!(!depth.test_and_set(1, 1, -100.0));
        assert!(depth.test_and_set(1, 1, 3.0));
        assert_eq!(depth.get(1, 1), Some(3.0));
        assert!(!depth.test_and_set(2, 0, 1.0));
        assert!(!depth.test_and_set(0, 0, f32::NAN));
        depth.clear();
        assert_eq!(depth.get(1, 1), Some(f32::NEG_INFINITY));
    }
}
