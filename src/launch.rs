//! Launch-screen generation.
//!
//! Launch screens come from either a user-supplied rectangular image or a
//! synthesized solid-color background with an optional centered logo. One
//! screen is produced per unique device resolution, always flattened opaque
//! (Apple forbids transparency here), with a startup-image link carrying the
//! device media query. An optional dark variant repeats the set with a
//! `prefers-color-scheme: dark` media query.

use crate::artifact::{Artifact, HtmlTag};
use crate::config::GenerationConfig;
use crate::context::GenerationContext;
use crate::error::Warning;
use crate::pipeline::{render_single, CategoryOutcome};
use crate::render::RenderBackend;
use crate::source::{SourceFormat, SourceImage};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::info;

/// Where the pixels of a launch screen come from.
#[derive(Debug, Clone)]
pub enum LaunchSource {
    /// A rectangular source image, stretched to each device resolution.
    Image(Arc<SourceImage>),
    /// A solid background color with an optional centered logo,
    /// synthesized per resolution so the logo never distorts.
    ColoredLogo {
        color: [u8; 3],
        logo: Option<Arc<SourceImage>>,
    },
}

impl LaunchSource {
    /// Materializes a source image for one target size.
    pub fn to_source_image(&self, width: u32, height: u32) -> SourceImage {
        match self {
            LaunchSource::Image(img) => (**img).clone(),
            LaunchSource::ColoredLogo { color, logo } => SourceImage::vector(
                synthesize_screen_svg(*color, logo.as_deref(), width, height),
            ),
        }
    }
}

/// The launch-screen half of a run: a light source and an optional dark one.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub source: LaunchSource,
    pub dark: Option<LaunchSource>,
}

/// Generates every launch-screen artifact for the run.
///
/// Resolutions process in parallel with order-preserving collection; dark
/// variants follow the light set so output order stays deterministic.
pub fn process_launch_screens(
    ctx: &GenerationContext,
    config: &GenerationConfig,
    backend: &dyn RenderBackend,
) -> CategoryOutcome {
    let mut outcome = CategoryOutcome::default();
    let Some(plan) = &ctx.launch else {
        outcome.warnings.push(Warning::SourceUnresolved {
            category: config.name,
            key: config.source_key,
        });
        return outcome;
    };

    let resolutions = ctx.catalog.resolutions_for(config.size_group);

    let mut variants: Vec<(&LaunchSource, &'static str, bool)> =
        vec![(&plan.source, "", false)];
    if let Some(dark) = &plan.dark {
        variants.push((dark, "dark", true));
    }

    for (source, suffix, dark) in variants {
        let results: Vec<Result<Artifact, Warning>> = resolutions
            .par_iter()
            .map(|resolution| {
                let materialized =
                    source.to_source_image(resolution.width, resolution.height);
                let png = render_single(
                    backend,
                    &materialized,
                    resolution,
                    &config.transforms,
                    ctx.background,
                    config.name,
                )?;

                let file_name = if suffix.is_empty() {
                    format!("{}-{}.png", ctx.layout.launch_prefix, resolution.label)
                } else {
                    format!(
                        "{}-{}-{}.png",
                        ctx.layout.launch_prefix, suffix, resolution.label
                    )
                };
                let href = ctx.layout.href_for(config.subdir, &file_name);

                let html_tag = ctx.emit_html.then(|| {
                    let media = resolution.media.clone().map(|m| {
                        if dark {
                            format!("{m} and (prefers-color-scheme: dark)")
                        } else {
                            m
                        }
                    });
                    HtmlTag::Link {
                        rel: "apple-touch-startup-image",
                        sizes: None,
                        href: href.clone(),
                        media,
                    }
                });

                Ok(Artifact {
                    file_name,
                    subdir: config.subdir,
                    png,
                    resolution: resolution.clone(),
                    category: config.name,
                    html_tag,
                    manifest_entry: None,
                })
            })
            .collect();

        for result in results {
            match result {
                Ok(artifact) => outcome.artifacts.push(artifact),
                Err(warning) => outcome.warnings.push(warning),
            }
        }
    }

    info!(
        category = config.name,
        artifacts = outcome.artifacts.len(),
        "launch screens generated"
    );
    outcome
}

/// Builds the SVG markup for a synthesized launch screen: a full-bleed
/// background rect with the logo centered in a box 40% of the short edge.
pub fn synthesize_screen_svg(
    color: [u8; 3],
    logo: Option<&SourceImage>,
    width: u32,
    height: u32,
) -> String {
    let fill = format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2]);
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\">\
         <rect width=\"100%\" height=\"100%\" fill=\"{fill}\"/>"
    );
    if let Some(logo) = logo {
        let edge = (width.min(height) as f32 * 0.4).round() as u32;
        let x = (width - edge) / 2;
        let y = (height - edge) / 2;
        svg.push_str(&format!(
            "<image x=\"{x}\" y=\"{y}\" width=\"{edge}\" height=\"{edge}\" \
             preserveAspectRatio=\"xMidYMid meet\" href=\"{}\"/>",
            data_uri(logo)
        ));
    }
    svg.push_str("</svg>");
    svg
}

/// Encodes a source image as a data URI for embedding in SVG markup.
fn data_uri(source: &SourceImage) -> String {
    let mime = match source.format() {
        SourceFormat::Vector => "image/svg+xml",
        SourceFormat::Raster => sniff_raster_mime(source.data()),
    };
    format!("data:{mime};base64,{}", BASE64.encode(source.data()))
}

fn sniff_raster_mime(data: &[u8]) -> &'static str {
    if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if data.starts_with(&[0xFF, 0xD8]) {
        "image/jpeg"
    } else if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::svg::render_vector;

    #[test]
    fn synthesized_screen_fills_with_the_background_color() {
        let svg = synthesize_screen_svg([18, 52, 86], None, 200, 400);
        let img = render_vector(svg.as_bytes(), 200, 400).unwrap();
        assert_eq!(img.get_pixel(5, 5).0, [18, 52, 86, 255]);
        assert_eq!(img.get_pixel(100, 200).0, [18, 52, 86, 255]);
    }

    #[test]
    fn synthesized_screen_centers_the_logo() {
        let logo = SourceImage::vector(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="#00ff00"/></svg>"##,
        );
        let svg = synthesize_screen_svg([0, 0, 0], Some(&logo), 400, 400);
        let img = render_vector(svg.as_bytes(), 400, 400).unwrap();
        assert_eq!(img.get_pixel(200, 200).0, [0, 255, 0, 255], "logo at center");
        assert_eq!(img.get_pixel(10, 10).0, [0, 0, 0, 255], "background at corner");
    }

    #[test]
    fn raster_mime_sniffing() {
        assert_eq!(sniff_raster_mime(&[0x89, b'P', b'N', b'G', 0]), "image/png");
        assert_eq!(sniff_raster_mime(&[0xFF, 0xD8, 0xFF]), "image/jpeg");
        assert_eq!(sniff_raster_mime(b"RIFF\0\0\0\0WEBP"), "image/webp");
    }

    #[test]
    fn colored_logo_source_materializes_per_resolution() {
        let source = LaunchSource::ColoredLogo {
            color: [1, 2, 3],
            logo: None,
        };
        let a = source.to_source_image(100, 200);
        let b = source.to_source_image(300, 100);
        assert!(a.is_vector() && b.is_vector());
        assert_ne!(a.data(), b.data(), "markup is sized per target");
    }
}
