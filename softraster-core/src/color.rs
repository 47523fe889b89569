/// Pixel colors stored in B,G,R,A byte order

/// Bytes per pixel of a framebuffer or color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    Grayscale = 1,
    #[default]
    Rgb = 3,
    Rgba = 4,
}

impl Format {
    pub fn bytes_per_pixel(self) -> usize {
        self as usize
    }

    pub fn from_bytes_per_pixel(bpp: usize) -> Option<Self> {
        match bpp {
            1 => Some(Self::Grayscale),
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }
}

/// A color with up to four channels.
///
/// `bytespp` records how many of the stored bytes are meaningful. A
/// grayscale color keeps its level in the first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    bgra: [u8; 4],
    bytespp: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            bgra: [b, g, r, a],
            bytespp: 4,
        }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn gray(v: u8) -> Self {
        Self {
            bgra: [v, 0, 0, 0],
            bytespp: 1,
        }
    }

    /// Build a color from raw B,G,R,A bytes; channels past `bpp` are zero.
    pub fn from_bytes(bytes: &[u8], bpp: usize) -> Self {
        let n = bpp.min(4).min(bytes.len());
        let mut bgra = [0u8; 4];
        bgra[..n].copy_from_slice(&bytes[..n]);
        Self {
            bgra,
            bytespp: n as u8,
        }
    }

    /// Flat grayscale face color for a Lambertian intensity in [0, 1]
    pub fn gray_level(intensity: f32) -> Self {
        let v = (intensity * 255.0).clamp(0.0, 255.0) as u8;
        Self::rgb(v, v, v)
    }

    pub fn r(&self) -> u8 {
        self.bgra[2]
    }

    pub fn g(&self) -> u8 {
        self.bgra[1]
    }

    pub fn b(&self) -> u8 {
        self.bgra[0]
    }

    pub fn a(&self) -> u8 {
        self.bgra[3]
    }

    pub fn bgra(&self) -> [u8; 4] {
        self.bgra
    }

    pub fn bytespp(&self) -> usize {
        self.bytespp as usize
    }

    /// Perceived brightness in [0, 1]
    pub fn luminance(&self) -> f32 {
        if self.bytespp == 1 {
            return self.bgra[0] as f32 / 255.0;
        }
        (0.299 * self.r() as f32 + 0.587 * self.g() as f32 + 0.114 * self.b() as f32) / 255.0
    }

    /// The bytes this color contributes to a pixel of the given format.
    ///
    /// Converting a color to grayscale keeps its luminance.
    pub(crate) fn to_format(self, format: Format) -> [u8; 4] {
        match format {
            Format::Grayscale if self.bytespp != 1 => {
                [(self.luminance() * 255.0).round() as u8, 0, 0, 0]
            }
            Format::Rgb | Format::Rgba if self.bytespp == 1 => {
                let v = self.bgra[0];
                [v, v, v, 255]
            }
            _ => self.bgra,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self {
            bgra: [0; 4],
            bytespp: 4,
        }
    }
}
