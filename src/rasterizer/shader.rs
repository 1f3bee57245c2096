//! Per-pixel shaders for triangle rasterization.
//!
//! The rasterizer handles coverage: bounding box, edge functions, and the
//! depth test. The shader handles color: attribute interpolation, texture
//! sampling, and lighting. Splitting the two mirrors how GPUs separate the
//! fixed-function rasterizer from the fragment stage.
//!
//! # Interpolation
//!
//! Shaders receive the affine barycentric weights of the pixel. Colors are
//! interpolated directly with those weights. Textured shaders instead weight
//! each vertex attribute by `bc_i / w_i` and divide by the weight sum, which
//! keeps the interpolation linear in 3D space (perspective-correct).

use crate::color::Color;
use crate::math::Vec2;
use crate::texture::Texture;

/// Computes the color for one covered pixel.
///
/// Returning `None` skips the pixel entirely; the rasterizer then leaves the
/// depth buffer untouched as well. This happens when the perspective weight
/// sum collapses to zero.
pub(crate) trait PixelShader {
    fn shade(&self, bc: [f64; 3]) -> Option<Color>;
}

/// Per-vertex `1 / w`, with 0 standing in for vertices whose clip-space w
/// was zero.
#[inline]
fn perspective_weights(bc: [f64; 3], inv_w: [f64; 3]) -> Option<[f64; 3]> {
    let pw = [bc[0] * inv_w[0], bc[1] * inv_w[1], bc[2] * inv_w[2]];
    let sum = pw[0] + pw[1] + pw[2];
    if sum == 0.0 {
        return None;
    }
    let inv_sum = 1.0 / sum;
    Some([pw[0] * inv_sum, pw[1] * inv_sum, pw[2] * inv_sum])
}

#[inline]
fn interpolate_uv(uvs: [Vec2; 3], weights: [f64; 3]) -> (f64, f64) {
    let u = weights[0] * uvs[0].x + weights[1] * uvs[1].x + weights[2] * uvs[2].x;
    let v = weights[0] * uvs[0].y + weights[1] * uvs[1].y + weights[2] * uvs[2].y;
    (u, v)
}

/// Constant color for every pixel.
pub(crate) struct FlatShader {
    color: Color,
}

impl FlatShader {
    pub(crate) fn new(color: Color) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _bc: [f64; 3]) -> Option<Color> {
        Some(self.color)
    }
}

/// Interpolates pre-lit vertex colors with the affine barycentric weights.
pub(crate) struct GouraudShader {
    colors: [Color; 3],
}

impl GouraudShader {
    pub(crate) fn new(colors: [Color; 3]) -> Self {
        Self { colors }
    }
}

impl PixelShader for GouraudShader {
    #[inline]
    fn shade(&self, bc: [f64; 3]) -> Option<Color> {
        let mix = |f: fn(Color) -> u8| {
            bc[0] * f64::from(f(self.colors[0]))
                + bc[1] * f64::from(f(self.colors[1]))
                + bc[2] * f64::from(f(self.colors[2]))
        };
        Some(Color::rgba(
            mix(|c| c.r) as u8,
            mix(|c| c.g) as u8,
            mix(|c| c.b) as u8,
            mix(|c| c.a) as u8,
        ))
    }
}

/// Samples a texture at perspective-correct UVs and scales by a single
/// face-lighting intensity.
pub(crate) struct TextureShader<'a> {
    texture: &'a Texture,
    uvs: [Vec2; 3],
    inv_w: [f64; 3],
    intensity: f64,
}

impl<'a> TextureShader<'a> {
    pub(crate) fn new(texture: &'a Texture, uvs: [Vec2; 3], inv_w: [f64; 3], intensity: f64) -> Self {
        Self {
            texture,
            uvs,
            inv_w,
            intensity,
        }
    }
}

impl PixelShader for TextureShader<'_> {
    #[inline]
    fn shade(&self, bc: [f64; 3]) -> Option<Color> {
        let weights = perspective_weights(bc, self.inv_w)?;
        let (u, v) = interpolate_uv(self.uvs, weights);
        Some(self.texture.sample(u, v).multiply(self.intensity))
    }
}

/// Samples a texture at perspective-correct UVs and scales by an
/// interpolated per-vertex lighting intensity.
pub(crate) struct TextureGouraudShader<'a> {
    texture: &'a Texture,
    uvs: [Vec2; 3],
    inv_w: [f64; 3],
    intensities: [f64; 3],
}

impl<'a> TextureGouraudShader<'a> {
    pub(crate) fn new(
        texture: &'a Texture,
        uvs: [Vec2; 3],
        inv_w: [f64; 3],
        intensities: [f64; 3],
    ) -> Self {
        Self {
            texture,
            uvs,
            inv_w,
            intensities,
        }
    }
}

impl PixelShader for TextureGouraudShader<'_> {
    #[inline]
    fn shade(&self, bc: [f64; 3]) -> Option<Color> {
        let weights = perspective_weights(bc, self.inv_w)?;
        let (u, v) = interpolate_uv(self.uvs, weights);
        let intensity = weights[0] * self.intensities[0]
            + weights[1] * self.intensities[1]
            + weights[2] * self.intensities[2];
        Some(self.texture.sample(u, v).multiply(intensity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gouraud_shader_returns_vertex_color_at_corners() {
        let shader = GouraudShader::new([Color::RED, Color::GREEN, Color::BLUE]);
        assert_eq!(shader.shade([1.0, 0.0, 0.0]), Some(Color::RED));
        assert_eq!(shader.shade([0.0, 1.0, 0.0]), Some(Color::GREEN));
        assert_eq!(shader.shade([0.0, 0.0, 1.0]), Some(Color::BLUE));
    }

    #[test]
    fn gouraud_shader_mixes_at_centroid() {
        let shader = GouraudShader::new([
            Color::rgb(255, 0, 0),
            Color::rgb(0, 255, 0),
            Color::rgb(0, 0, 255),
        ]);
        let third = 1.0 / 3.0;
        let c = shader.shade([third, third, third]).unwrap();
        assert_eq!((c.r, c.g, c.b), (85, 85, 85));
    }

    #[test]
    fn textured_shader_skips_pixels_with_zero_weight_sum() {
        let tex = Texture::new(2, 2);
        let shader = TextureShader::new(&tex, [Vec2::ZERO; 3], [0.0; 3], 1.0);
        assert_eq!(shader.shade([0.4, 0.3, 0.3]), None);
    }

    #[test]
    fn equal_w_reduces_perspective_weights_to_affine() {
        let pw = perspective_weights([0.25, 0.25, 0.5], [2.0, 2.0, 2.0]).unwrap();
        assert_eq!(pw, [0.25, 0.25, 0.5]);
    }
}
