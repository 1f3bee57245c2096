//! CPU-resident RGBA framebuffer with basic 2D drawing primitives.
//!
//! The framebuffer is a row-major pixel grid. All writes silently ignore
//! out-of-bounds coordinates and all reads return transparent black outside
//! the grid, so callers never need to pre-clip.

use std::path::Path;

use crate::color::Color;

/// A row-major grid of RGBA pixels.
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// Creates a framebuffer with all pixels transparent black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Fills the framebuffer with a solid color.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Sets the pixel at (x, y). Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return;
        }
        self.pixels[y as usize * self.width + x as usize] = color;
    }

    /// Returns the color at (x, y), or transparent black if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return Color::TRANSPARENT;
        }
        self.pixels[y as usize * self.width + x as usize]
    }

    /// The raw pixel storage, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Draws a line from (x0, y0) to (x1, y1) using Bresenham's integer
    /// algorithm. Both endpoints are included; all octants are handled.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let (mut x, mut y) = (x0, y0);
        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draws a filled rectangle.
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for py in y..y + h {
            for px in x..x + w {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// Draws a one-pixel rectangle outline.
    pub fn draw_rect_outline(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for px in x..x + w {
            self.set_pixel(px, y, color);
            self.set_pixel(px, y + h - 1, color);
        }
        for py in y..y + h {
            self.set_pixel(x, py, color);
            self.set_pixel(x + w - 1, py, color);
        }
    }

    /// Converts the framebuffer to an RGBA image.
    pub fn to_image(&self) -> image::RgbaImage {
        let mut img = image::RgbaImage::new(self.width as u32, self.height as u32);
        for (i, pixel) in self.pixels.iter().enumerate() {
            let x = (i % self.width) as u32;
            let y = (i / self.width) as u32;
            img.put_pixel(x, y, image::Rgba([pixel.r, pixel.g, pixel.b, pixel.a]));
        }
        img
    }

    /// Saves the framebuffer as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        self.to_image().save_with_format(path, image::ImageFormat::Png)
    }
}
