use crate::domain::model::Canvas;
use crate::utils::error::Result;
use image::imageops::FilterType;
use image::RgbImage;
use std::path::Path;

pub const BACKGROUND_ALPHA: f64 = 0.2;

/// 背景圖不存在時回傳 `None`；存在但無法解碼時回傳錯誤
pub fn load_background(path: &Path, (width, height): (u32, u32)) -> Result<Option<RgbImage>> {
    if !path.exists() {
        return Ok(None);
    }

    let bytes = std::fs::read(path)?;
    let img = image::load_from_memory(&bytes)?;
    tracing::debug!(
        "Loaded background {} ({}x{}), resizing to {}x{}",
        path.display(),
        img.width(),
        img.height(),
        width,
        height
    );
    Ok(Some(
        img.resize_exact(width, height, FilterType::Triangle).to_rgb8(),
    ))
}

/// Alpha-blends `image` over the current canvas pixels.
pub fn blend_under(canvas: &mut Canvas, image: &RgbImage, alpha: f64) {
    for (dst, src) in canvas.pixels.chunks_exact_mut(3).zip(image.pixels()) {
        for (d, s) in dst.iter_mut().zip(src.0) {
            *d = ((1.0 - alpha) * *d as f64 + alpha * s as f64).round() as u8;
        }
    }
}
