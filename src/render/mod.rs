//! Rendering capability.
//!
//! The pipeline talks to rendering through the [`RenderBackend`] trait so the
//! processing logic stays independent of resvg/image specifics (and so tests
//! can inject failures). [`ResvgBackend`] is the production implementation:
//! vector sources render natively at the target size, raster sources are
//! resampled.

pub mod raster;
pub mod svg;
pub mod transform;

use crate::source::{SourceFormat, SourceImage};
use image::RgbaImage;
use thiserror::Error;

/// A render or encode failure for one (source, resolution) pair.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("malformed vector markup: {0}")]
    Svg(String),

    #[error("unsupported or corrupt raster data: {0}")]
    Raster(#[from] image::ImageError),

    #[error("could not allocate a {0}x{1} pixmap")]
    Allocation(u32, u32),

    #[error("PNG encoding failed: {0}")]
    Encode(#[source] image::ImageError),
}

/// Renders a source image to a bitmap at exact pixel dimensions.
pub trait RenderBackend: Sync {
    fn render(
        &self,
        source: &SourceImage,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, RenderError>;
}

/// Production backend: resvg for vectors, `image` resampling for rasters.
#[derive(Debug, Default)]
pub struct ResvgBackend;

impl RenderBackend for ResvgBackend {
    fn render(
        &self,
        source: &SourceImage,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, RenderError> {
        match source.format() {
            SourceFormat::Vector => svg::render_vector(source.data(), width, height),
            SourceFormat::Raster => raster::render_raster(source.data(), width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CIRCLE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><circle cx="50" cy="50" r="40" fill="#3366cc"/></svg>"##;

    #[test]
    fn vector_source_renders_at_exact_size() {
        let source = SourceImage::vector(CIRCLE_SVG);
        let img = ResvgBackend.render(&source, 180, 180).unwrap();
        assert_eq!((img.width(), img.height()), (180, 180));
    }

    #[test]
    fn vector_source_stretches_to_non_square_targets() {
        let source = SourceImage::vector(CIRCLE_SVG);
        let img = ResvgBackend.render(&source, 310, 150).unwrap();
        assert_eq!((img.width(), img.height()), (310, 150));
    }

    #[test]
    fn malformed_markup_is_a_render_error() {
        let source = SourceImage::vector("<svg incomplete");
        let err = ResvgBackend.render(&source, 64, 64).unwrap_err();
        assert!(matches!(err, RenderError::Svg(_)));
    }

    #[test]
    fn raster_source_upscales_and_downscales() {
        let png = raster::encode_png(&RgbaImage::from_pixel(
            64,
            64,
            image::Rgba([10, 20, 30, 255]),
        ))
        .unwrap();
        let source = SourceImage::new(png, SourceFormat::Raster);
        let up = ResvgBackend.render(&source, 128, 128).unwrap();
        assert_eq!((up.width(), up.height()), (128, 128));
        let down = ResvgBackend.render(&source, 16, 16).unwrap();
        assert_eq!((down.width(), down.height()), (16, 16));
    }

    #[test]
    fn corrupt_raster_is_a_render_error() {
        let source = SourceImage::new(vec![0xde, 0xad, 0xbe, 0xef], SourceFormat::Raster);
        let err = ResvgBackend.render(&source, 64, 64).unwrap_err();
        assert!(matches!(err, RenderError::Raster(_)));
    }
}
