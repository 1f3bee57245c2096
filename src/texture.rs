//! 2D textures with configurable wrapping and filtering.
//!
//! # UV Coordinate Convention
//!
//! UV coordinates are in [0, 1] with V = 0 at the bottom. Texels are stored
//! top-left origin, so sampling first applies the wrap mode per axis and
//! then flips V (`v <- 1 - v`) before looking up texels.

use crate::color::Color;

/// How texture coordinates outside [0, 1] are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WrapMode {
    /// Tile the texture.
    #[default]
    Repeat,
    /// Clamp to the edge texel.
    Clamp,
}

/// How texels are filtered when sampling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest-neighbor (pixelated).
    #[default]
    Nearest,
    /// Bilinear interpolation between the four nearest texels.
    Bilinear,
}

/// A 2D image for texture mapping.
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
    /// Horizontal wrap mode.
    pub wrap_u: WrapMode,
    /// Vertical wrap mode.
    pub wrap_v: WrapMode,
    pub filter: FilterMode,
}

impl Texture {
    /// Creates an empty (transparent black) texture.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width * height],
            wrap_u: WrapMode::Repeat,
            wrap_v: WrapMode::Repeat,
            filter: FilterMode::Nearest,
        }
    }

    /// Creates a texture from a decoded image, converting to RGBA8.
    pub fn from_image(img: &image::DynamicImage) -> Self {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        let mut tex = Self::new(width as usize, height as usize);
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            tex.set_pixel(x as i32, y as i32, Color::rgba(r, g, b, a));
        }
        tex
    }

    /// Creates a procedural checkerboard texture with cells of `cell` pixels.
    pub fn checkerboard(width: usize, height: usize, cell: usize, c1: Color, c2: Color) -> Self {
        let mut tex = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let color = if ((x / cell) + (y / cell)) % 2 == 0 {
                    c1
                } else {
                    c2
                };
                tex.set_pixel(x as i32, y as i32, color);
            }
        }
        tex
    }

    /// Creates a horizontal gradient from `left` to `right`.
    pub fn gradient(width: usize, height: usize, left: Color, right: Color) -> Self {
        let mut tex = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let t = x as f64 / (width - 1) as f64;
                tex.set_pixel(x as i32, y as i32, left.lerp(right, t));
            }
        }
        tex
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sets a texel. Out-of-bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return;
        }
        self.pixels[y as usize * self.width + x as usize] = color;
    }

    /// Returns the texel at (x, y), or transparent black if out of bounds.
    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return Color::TRANSPARENT;
        }
        self.pixels[y as usize * self.width + x as usize]
    }

    /// Samples the texture at UV coordinates.
    ///
    /// Coordinates are wrapped per axis, V is flipped, and the configured
    /// filter decides between nearest and bilinear lookup.
    #[inline]
    pub fn sample(&self, u: f64, v: f64) -> Color {
        let u = wrap_coord(u, self.wrap_u);
        let v = 1.0 - wrap_coord(v, self.wrap_v);

        match self.filter {
            FilterMode::Bilinear => self.sample_bilinear(u, v),
            FilterMode::Nearest => self.sample_nearest(u, v),
        }
    }

    fn sample_nearest(&self, u: f64, v: f64) -> Color {
        let x = ((u * self.width as f64) as usize).min(self.width - 1);
        let y = ((v * self.height as f64) as usize).min(self.height - 1);
        self.get_pixel(x as i32, y as i32)
    }

    fn sample_bilinear(&self, u: f64, v: f64) -> Color {
        // Texel centers sit at half-integer coordinates.
        let fx = u * self.width as f64 - 0.5;
        let fy = v * self.height as f64 - 0.5;

        let x0 = fx.floor() as i64;
        let y0 = fy.floor() as i64;
        let x1 = x0 + 1;
        let y1 = y0 + 1;

        let tx = fx - x0 as f64;
        let ty = fy - y0 as f64;

        let x0 = wrap_texel(x0, self.width, self.wrap_u);
        let x1 = wrap_texel(x1, self.width, self.wrap_u);
        let y0 = wrap_texel(y0, self.height, self.wrap_v);
        let y1 = wrap_texel(y1, self.height, self.wrap_v);

        let c00 = self.get_pixel(x0, y0);
        let c10 = self.get_pixel(x1, y0);
        let c01 = self.get_pixel(x0, y1);
        let c11 = self.get_pixel(x1, y1);

        let top = c00.lerp(c10, tx);
        let bottom = c01.lerp(c11, tx);
        top.lerp(bottom, ty)
    }
}

/// Applies a wrap mode to a normalized coordinate.
fn wrap_coord(coord: f64, mode: WrapMode) -> f64 {
    match mode {
        WrapMode::Repeat => coord - coord.floor(),
        WrapMode::Clamp => coord.clamp(0.0, 1.0),
    }
}

/// Applies a wrap mode to an integer texel coordinate.
fn wrap_texel(x: i64, size: usize, mode: WrapMode) -> i32 {
    let size = size as i64;
    let wrapped = match mode {
        WrapMode::Repeat => ((x % size) + size) % size,
        WrapMode::Clamp => x.clamp(0, size - 1),
    };
    wrapped as i32
}
