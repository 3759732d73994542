//! Simple ray tracer example.
//!
//! Renders a red sphere, a mirror and a glass ball over a floor and saves the
//! result in PPM format.

use lumen_renderer::{
    Color, ImageBuffer, Material, Plane, PointLight, RenderOptions, Scene, Sphere, Vec3,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;

fn main() -> std::io::Result<()> {
    println!("Lumen Ray Tracer - Simple Example");
    println!("=================================");

    let options = RenderOptions::default()
        .with_camera_position(Vec3::new(0.0, 1.0, -2.0))
        .with_aa_multiplier(2);

    let start = std::time::Instant::now();
    let scene = build_scene(options);
    println!("Scene built in {:?}", start.elapsed());

    let mut image = ImageBuffer::new(400, 300);
    println!("Rendering {}x{}...", image.width, image.height);

    let start = std::time::Instant::now();
    scene.render(&mut image);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename)?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene(options: RenderOptions) -> Scene {
    let mut scene = Scene::new(options);

    // Floor
    scene.add_entity(Arc::new(Plane::new(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::Y,
        Material::diffuse(Color::new(0.5, 0.5, 0.5)),
    )));

    // Diffuse, mirror and glass spheres
    scene.add_entity(Arc::new(Sphere::new(
        Vec3::new(-2.2, 0.0, 6.0),
        1.0,
        Material::diffuse(Color::new(0.9, 0.1, 0.1)),
    )));
    scene.add_entity(Arc::new(Sphere::new(
        Vec3::new(0.0, 0.0, 7.0),
        1.0,
        Material::reflective(Color::ONE),
    )));
    scene.add_entity(Arc::new(Sphere::new(
        Vec3::new(2.2, 0.0, 6.0),
        1.0,
        Material::refractive(Color::new(0.4, 0.1, 0.0), 1.5),
    )));

    scene.add_point_light(PointLight::new(Vec3::new(0.0, 6.0, 2.0), Color::splat(0.8)));
    scene.add_point_light(PointLight::new(Vec3::new(-5.0, 4.0, 0.0), Color::splat(0.4)));

    scene
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for rgb in image.to_rgb8().chunks_exact(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    Ok(())
}
