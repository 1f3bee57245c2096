//! Renders a textured cube to `cube.png` and prints the culling stats.
//!
//! Run with: `cargo run --example cube`

use softraster::prelude::*;

fn main() -> Result<(), image::ImageError> {
    let mut camera = Camera::new();
    camera.set_position(Vec3::new(3.0, 2.5, 4.0));
    camera.look_at(Vec3::ZERO);
    camera.set_aspect(1.0);

    let mut fb = Framebuffer::new(512, 512);
    fb.clear(Color::rgb(30, 30, 40));

    let mut rasterizer = Rasterizer::new(&mut camera, &mut fb);
    rasterizer.clear_depth();
    rasterizer.reset_culling_stats();

    let cube = Mesh::cube(2.0);
    let mut texture = Texture::checkerboard(64, 64, 8, Color::WHITE, Color::rgb(180, 60, 40));
    texture.filter = FilterMode::Bilinear;

    let spin = Mat4::rotation_y(0.6) * Mat4::rotation_x(0.3);
    let light = Vec3::new(-0.5, -0.8, -1.0);

    rasterizer.draw_mesh_textured_gouraud(&cube, spin, &texture, light);

    // A second cube far outside the view to show frustum culling at work.
    let offscreen = Mat4::translation(Vec3::new(200.0, 0.0, 0.0));
    rasterizer.draw_mesh_textured_gouraud(&cube, offscreen, &texture, light);

    let stats = rasterizer.culling_stats;
    println!(
        "meshes tested: {}, drawn: {}, culled: {}",
        stats.meshes_tested, stats.meshes_drawn, stats.meshes_culled
    );

    fb.save_png("cube.png")?;
    println!("wrote cube.png");
    Ok(())
}
