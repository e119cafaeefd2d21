//! Raster decoding, resampling, and PNG encoding.

use super::RenderError;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

/// Decodes raster bytes and resamples to exactly `width` x `height`.
///
/// Both downscaling and upscaling are supported; upscaling a small source is
/// a known degraded-quality condition, not an error.
pub fn render_raster(data: &[u8], width: u32, height: u32) -> Result<RgbaImage, RenderError> {
    let decoded = image::load_from_memory(data)?.into_rgba8();
    if (decoded.width(), decoded.height()) == (width, height) {
        return Ok(decoded);
    }
    Ok(image::imageops::resize(
        &decoded,
        width,
        height,
        FilterType::Lanczos3,
    ))
}

/// Encodes a bitmap as PNG. Deterministic for identical input.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(RenderError::Encode)?;
    Ok(out)
}
