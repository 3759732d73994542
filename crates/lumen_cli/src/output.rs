//! Image file output.
//!
//! PPM (P3) is written by hand; every other extension goes through the
//! `image` crate, which picks the encoder from the extension. Colours are
//! clamped to [0, 1] and scaled to 8 bits without gamma correction.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use image::RgbImage;
use log::info;
use lumen_renderer::ImageBuffer;

/// Save `image` to `path`, choosing the format from the extension.
pub fn save_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        save_ppm(image, path)?;
    } else {
        save_with_image_crate(image, path)?;
    }

    info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}

fn save_with_image_crate(image: &ImageBuffer, path: &Path) -> Result<()> {
    let rgb = RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .context("Pixel buffer does not match the image size")?;

    rgb.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn save_ppm(image: &ImageBuffer, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for rgb in image.to_rgb8().chunks_exact(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_renderer::Color;

    fn test_image() -> ImageBuffer {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, Color::new(1.0, 0.0, 0.0));
        image.set(1, 1, Color::new(2.0, 0.5, -1.0));
        image
    }

    #[test]
    fn test_save_ppm() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ppm");

        save_image(&test_image(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[..3], ["P3", "2 2", "255"]);
        assert_eq!(lines[3], "255 0 0");
        assert_eq!(lines[6], "255 128 0");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        save_image(&test_image(), &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.ppm");

        assert!(save_image(&test_image(), &path).is_err());
    }
}
