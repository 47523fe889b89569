/// ASCII preview of a rendered framebuffer for the terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use softraster_core::{Canvas, Framebuffer};

/// Character luminosity ramp (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Downsamples a framebuffer into a grid of characters
pub struct AsciiPreview {
    columns: usize,
    rows: usize,
}

impl AsciiPreview {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    /// Fit the image into at most `columns` x `rows` cells, keeping its aspect ratio.
    pub fn fit(image: &Framebuffer, columns: usize, rows: usize) -> Self {
        let (w, h) = (image.width().max(1) as f32, image.height().max(1) as f32);
        let scale = (columns as f32 / w).min(rows as f32 * CELL_ASPECT / h);
        Self::new((w * scale) as usize, (h * scale / CELL_ASPECT) as usize)
    }

    pub fn size(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    /// Character grid, top row first
    pub fn characters(&self, image: &Framebuffer) -> Vec<Vec<char>> {
        let (w, h) = (image.width(), image.height());
        (0..self.rows)
            .map(|row| {
                // Framebuffer row 0 is the bottom of the picture
                let y = h.saturating_sub(1).saturating_sub(row * h / self.rows);
                (0..self.columns)
                    .map(|col| {
                        let x = col * w / self.columns;
                        shade(image.get(x as i32, y as i32).luminance())
                    })
                    .collect()
            })
            .collect()
    }

    pub fn draw<W: Write>(&self, image: &Framebuffer, writer: &mut W) -> std::io::Result<()> {
        for line in self.characters(image) {
            for c in line {
                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        writer.flush()
    }
}

fn shade(luminance: f32) -> char {
    let index = (luminance.clamp(0.0, 1.0) * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}
