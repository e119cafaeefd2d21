//! The generation pipeline.
//!
//! A run walks the active configuration table in order; each icon category
//! resolves its source once, then renders every target resolution in
//! parallel with order-preserving collection. Failures degrade to warnings
//! scoped to one category or one artifact, never the run.

use crate::artifact::{Artifact, HtmlTag, ManifestEntry};
use crate::catalog::Resolution;
use crate::config::{
    CategoryKind, GenerationConfig, HtmlStyle, ManifestPurpose, Transforms,
};
use crate::context::GenerationContext;
use crate::error::Warning;
use crate::launch::process_launch_screens;
use crate::render::transform::{
    clip_to_rounded_shape, desaturate, flatten_to_opaque, strip_to_transparent,
};
use crate::render::{raster::encode_png, RenderBackend};
use crate::source::SourceImage;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// What one category produced: artifacts in resolution order, plus any
/// warnings raised along the way.
#[derive(Debug, Default)]
pub struct CategoryOutcome {
    pub artifacts: Vec<Artifact>,
    pub warnings: Vec<Warning>,
}

/// Everything a run produced. Artifact order is the configuration table
/// order, with each category's resolutions in catalog order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub artifacts: Vec<Artifact>,
    pub warnings: Vec<Warning>,
}

impl RunReport {
    /// HTML tags in artifact order.
    pub fn html_tags(&self) -> Vec<&HtmlTag> {
        self.artifacts
            .iter()
            .filter_map(|a| a.html_tag.as_ref())
            .collect()
    }

    /// Manifest entries in artifact order.
    pub fn manifest_entries(&self) -> Vec<&ManifestEntry> {
        self.artifacts
            .iter()
            .filter_map(|a| a.manifest_entry.as_ref())
            .collect()
    }
}

/// Runs every active category and concatenates the outcomes.
pub fn run_pipeline(ctx: &GenerationContext, backend: &dyn RenderBackend) -> RunReport {
    let mut report = RunReport::default();
    for config in &ctx.configs {
        let outcome = match config.kind {
            CategoryKind::Icon => process_category(ctx, config, backend),
            CategoryKind::LaunchScreen => process_launch_screens(ctx, config, backend),
        };
        report.artifacts.extend(outcome.artifacts);
        report.warnings.extend(outcome.warnings);
    }
    info!(
        artifacts = report.artifacts.len(),
        warnings = report.warnings.len(),
        "pipeline finished"
    );
    report
}

/// Generates one icon category: resolve the source, then render every
/// resolution in the category's size group.
pub fn process_category(
    ctx: &GenerationContext,
    config: &GenerationConfig,
    backend: &dyn RenderBackend,
) -> CategoryOutcome {
    let mut outcome = CategoryOutcome::default();

    let Some(source) = ctx.sources.get(config.source_key) else {
        warn!(category = config.name, key = %config.source_key, "no source; skipping");
        outcome.warnings.push(Warning::SourceUnresolved {
            category: config.name,
            key: config.source_key,
        });
        return outcome;
    };

    let resolutions = ctx.catalog.resolutions_for(config.size_group);
    debug!(
        category = config.name,
        targets = resolutions.len(),
        "rendering category"
    );

    let results: Vec<Result<Artifact, Warning>> = resolutions
        .par_iter()
        .map(|resolution| make_artifact(ctx, config, source, resolution, backend))
        .collect();

    for result in results {
        match result {
            Ok(artifact) => outcome.artifacts.push(artifact),
            Err(warning) => outcome.warnings.push(warning),
        }
    }
    outcome
}

/// Renders one (source, resolution) pair through the transform chain and
/// encodes it. The transform order is fixed; see [`Transforms`].
pub fn render_single(
    backend: &dyn RenderBackend,
    source: &SourceImage,
    resolution: &Resolution,
    transforms: &Transforms,
    background: [u8; 3],
    category: &'static str,
) -> Result<Vec<u8>, Warning> {
    let as_warning = |source| Warning::Render {
        category,
        label: resolution.label.clone(),
        source,
    };

    let mut img = backend
        .render(source, resolution.width, resolution.height)
        .map_err(as_warning)?;
    if transforms.desaturate {
        img = desaturate(&img);
    }
    if transforms.opaque {
        img = flatten_to_opaque(&img, background);
    }
    if transforms.transparent {
        img = strip_to_transparent(&img);
    }
    if transforms.clip {
        img = clip_to_rounded_shape(&img);
    }
    encode_png(&img).map_err(as_warning)
}

fn make_artifact(
    ctx: &GenerationContext,
    config: &GenerationConfig,
    source: &SourceImage,
    resolution: &Resolution,
    backend: &dyn RenderBackend,
) -> Result<Artifact, Warning> {
    let png = render_single(
        backend,
        source,
        resolution,
        &config.transforms,
        ctx.background,
        config.name,
    )?;

    let file_name = if config.stem_suffix.is_empty() {
        format!("{}-{}.png", ctx.layout.prefix, resolution.label)
    } else {
        format!(
            "{}-{}-{}.png",
            ctx.layout.prefix, config.stem_suffix, resolution.label
        )
    };
    let href = ctx.layout.href_for(config.subdir, &file_name);

    let html_tag = if ctx.emit_html {
        html_tag_for(config.html, resolution, &href)
    } else {
        None
    };
    let manifest_entry = if ctx.emit_manifest {
        manifest_entry_for(config.purposes, resolution, &href)
    } else {
        None
    };

    Ok(Artifact {
        file_name,
        subdir: config.subdir,
        png,
        resolution: resolution.clone(),
        category: config.name,
        html_tag,
        manifest_entry,
    })
}

fn html_tag_for(style: HtmlStyle, resolution: &Resolution, href: &str) -> Option<HtmlTag> {
    match style {
        HtmlStyle::TouchIcon => Some(HtmlTag::Link {
            rel: "apple-touch-icon",
            sizes: Some(resolution.label.clone()),
            href: href.to_string(),
            media: None,
        }),
        HtmlStyle::DarkTouchIcon => Some(HtmlTag::Link {
            rel: "apple-touch-icon",
            sizes: Some(resolution.label.clone()),
            href: href.to_string(),
            media: Some("(prefers-color-scheme: dark)".to_string()),
        }),
        HtmlStyle::MsTileMeta => {
            let shape = if resolution.is_square() { "square" } else { "wide" };
            Some(HtmlTag::Meta {
                name: format!("msapplication-{shape}{}logo", resolution.label),
                content: href.to_string(),
            })
        }
        // Startup images are emitted by the launch-screen path.
        HtmlStyle::StartupImage | HtmlStyle::None => None,
    }
}

fn manifest_entry_for(
    purposes: &[ManifestPurpose],
    resolution: &Resolution,
    href: &str,
) -> Option<ManifestEntry> {
    if purposes.is_empty() {
        return None;
    }
    // `any` is the manifest default, so a sole `any` purpose is omitted.
    let purpose = if matches!(purposes, [ManifestPurpose::Any]) {
        None
    } else {
        Some(
            purposes
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        )
    };
    Some(ManifestEntry {
        src: href.to_string(),
        sizes: resolution.label.clone(),
        mime_type: "image/png",
        purpose,
    })
}
