//! Image decoding and display sizing for the peek window

use anyhow::{Context, Result};
use eframe::egui;
use image::imageops::FilterType;
use std::path::Path;

/// Decode a PNG/JPEG/BMP file into an egui image no larger than `max`×`max`
///
/// Oversized sources are resampled here so the texture upload never exceeds
/// the GPU's texture size limit.
pub fn load(path: &Path, max: f32) -> Result<egui::ColorImage> {
    let mut decoded = image::open(path).context(format!("Failed to decode image {}", path.display()))?;

    let fitted = display_size([decoded.width() as usize, decoded.height() as usize], max);
    let (width, height) = (
        (fitted.x.round() as u32).max(1),
        (fitted.y.round() as u32).max(1),
    );
    if (width, height) != (decoded.width(), decoded.height()) {
        decoded = decoded.resize_exact(width, height, FilterType::Triangle);
    }

    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Uniform scale that fits `width`×`height` into a `max`×`max` box
/// Images that already fit are never enlarged
pub fn display_scale(width: f32, height: f32, max: f32) -> f32 {
    if width > max || height > max {
        (max / width).min(max / height)
    } else {
        1.0
    }
}

/// On-screen size of an image after [`display_scale`]
pub fn display_size(size: [usize; 2], max: f32) -> egui::Vec2 {
    let (width, height) = (size[0] as f32, size[1] as f32);
    let scale = display_scale(width, height, max);
    egui::vec2(width * scale, height * scale)
}
