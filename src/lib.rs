//! A CPU-based software 3D rasterization core.
//!
//! This crate renders indexed triangle meshes into a CPU-resident RGBA
//! framebuffer with a depth buffer: perspective projection, backface
//! culling, view-frustum culling, Gouraud shading, and perspective-correct
//! texture sampling. There is no window, input, or GPU involved; the caller
//! owns the framebuffer and decides where the pixels go (an image file, a
//! terminal, a GUI surface).
//!
//! # Quick Start
//!
//! ```
//! use softraster::prelude::*;
//!
//! let mut camera = Camera::new();
//! camera.set_position(Vec3::new(0.0, 0.0, 5.0));
//! camera.look_at(Vec3::ZERO);
//! camera.set_aspect(1.0);
//!
//! let mut fb = Framebuffer::new(64, 64);
//! let mut rasterizer = Rasterizer::new(&mut camera, &mut fb);
//!
//! rasterizer.clear_depth();
//! let cube = Mesh::cube(2.0);
//! rasterizer.draw_mesh_gouraud(
//!     &cube,
//!     Mat4::identity(),
//!     Color::rgb(200, 120, 40),
//!     Vec3::new(0.0, 0.0, 1.0),
//! );
//! ```

pub mod camera;
pub mod color;
pub mod framebuffer;
pub mod frustum;
pub mod geometry;
pub mod math;
pub mod mesh;
pub mod rasterizer;
pub mod texture;
pub mod wireframe;

// Re-export commonly needed types at the crate root for convenience.
pub use camera::Camera;
pub use color::Color;
pub use framebuffer::Framebuffer;
pub use frustum::Frustum;
pub use geometry::{Aabb, Plane};
pub use mesh::{Bounded, Geometry, Mesh};
pub use rasterizer::{CullingStats, Rasterizer, Triangle, Vertex};
pub use texture::{FilterMode, Texture, WrapMode};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use softraster::prelude::*;
/// ```
pub mod prelude {
    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Scene
    pub use crate::camera::Camera;
    pub use crate::geometry::{Aabb, Plane};
    pub use crate::mesh::{Bounded, Geometry, Mesh, MeshVertex};

    // Rendering
    pub use crate::color::Color;
    pub use crate::framebuffer::Framebuffer;
    pub use crate::frustum::Frustum;
    pub use crate::rasterizer::{CullingStats, Rasterizer, Triangle, Vertex};
    pub use crate::texture::{FilterMode, Texture, WrapMode};
    pub use crate::wireframe::Wireframe;
}
