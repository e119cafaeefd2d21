//! Vector rendering via resvg/usvg.

use super::RenderError;
use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

/// Renders SVG markup to an RGBA bitmap at exactly `width` x `height`.
///
/// The content is scaled independently on each axis to fill the target, so a
/// square viewBox rendered at 310x150 stretches rather than letterboxes.
pub fn render_vector(data: &[u8], width: u32, height: u32) -> Result<RgbaImage, RenderError> {
    let opts = Options::default();
    let tree = Tree::from_data(data, &opts).map_err(|e| RenderError::Svg(e.to_string()))?;

    let svg_size = tree.size();
    if svg_size.width() <= 0.0 || svg_size.height() <= 0.0 {
        return Err(RenderError::Svg("zero-sized root element".into()));
    }
    let sx = width as f32 / svg_size.width();
    let sy = height as f32 / svg_size.height();

    let mut pixmap =
        Pixmap::new(width, height).ok_or(RenderError::Allocation(width, height))?;
    resvg::render(&tree, Transform::from_scale(sx, sy), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba(&pixmap))
}

/// Converts a tiny-skia pixmap (premultiplied alpha) to an `RgbaImage`.
fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (src, out) in pixmap.pixels().iter().zip(img.pixels_mut()) {
        let (r, g, b, a) = unpremultiply(src.red(), src.green(), src.blue(), src.alpha());
        *out = Rgba([r, g, b, a]);
    }
    img
}

fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        return (0, 0, 0, 0);
    }
    let a_f = a as f32 / 255.0;
    (
        (r as f32 / a_f).round().min(255.0) as u8,
        (g as f32 / a_f).round().min(255.0) as u8,
        (b as f32 / a_f).round().min(255.0) as u8,
        a,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPAQUE_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="#ff0000"/></svg>"##;

    #[test]
    fn renders_exact_dimensions() {
        let img = render_vector(OPAQUE_SQUARE.as_bytes(), 57, 57).unwrap();
        assert_eq!((img.width(), img.height()), (57, 57));
        assert_eq!(img.get_pixel(28, 28).0, [255, 0, 0, 255]);
    }

    #[test]
    fn transparent_regions_stay_transparent() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><circle cx="5" cy="5" r="2" fill="#00ff00"/></svg>"##;
        let img = render_vector(svg.as_bytes(), 100, 100).unwrap();
        assert_eq!(img.get_pixel(2, 2).0[3], 0, "corner should be transparent");
        assert!(img.get_pixel(50, 50).0[3] > 0, "center should be drawn");
    }

    #[test]
    fn unpremultiply_round_trips_half_alpha() {
        // 128 premultiplied by 50% alpha stores as 64.
        let (r, _, _, a) = unpremultiply(64, 0, 0, 128);
        assert_eq!(a, 128);
        assert!((126..=130).contains(&r));
    }
}
