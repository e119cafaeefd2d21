//! Generation context: the aggregate root threaded through the pipeline.
//!
//! Built once per invocation from CLI-level inputs; read-only afterwards.
//! Construction resolves every source image, loads the catalog, and fixes the
//! active configuration list and output-location metadata. Fatal conditions
//! surface here, before any rendering begins.

use crate::catalog::AssetCatalog;
use crate::config::{GenerationConfig, IconFlag};
use crate::error::ConfigError;
use crate::launch::{LaunchPlan, LaunchSource};
use crate::source::{SourceFormat, SourceImage, SourceKey, SourceSet};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Minimum recommended raster base edge, per the input docs.
const MIN_RASTER_EDGE: u32 = 1024;

/// Output-location metadata, finalized at construction.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub destination_dir: PathBuf,
    pub html_destination: PathBuf,
    pub html_file_name: String,
    /// Path prefix prepended to hrefs so markup resolves relative to the
    /// HTML destination.
    pub href_prefix: String,
    /// Naming prefix for icon files.
    pub prefix: String,
    /// Naming prefix for launch-screen files.
    pub launch_prefix: String,
}

impl OutputLayout {
    /// Relative href for an artifact in `subdir` with the given file name.
    pub fn href_for(&self, subdir: &str, file_name: &str) -> String {
        [self.href_prefix.as_str(), subdir, file_name]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Everything a run needs, assembled from CLI inputs.
#[derive(Debug)]
pub struct ContextInputs {
    /// Explicitly supplied images per source key. `Base` is mandatory unless
    /// a launch plan can synthesize one.
    pub explicit: HashMap<SourceKey, SourceImage>,
    /// Enabled feature flags; the active config list preserves table order
    /// regardless of the order given here.
    pub flags: Vec<IconFlag>,
    pub launch: Option<LaunchPlan>,
    /// Background color used when flattening to opaque.
    pub background: [u8; 3],
    pub prefix: String,
    pub launch_prefix: String,
    pub destination_dir: PathBuf,
    pub html_destination: PathBuf,
    pub html_file_name: String,
    pub emit_html: bool,
    pub emit_manifest: bool,
    /// When false, markup records are still produced but no image files are
    /// written (the `--no-icons` mode).
    pub write_images: bool,
    pub catalog: AssetCatalog,
}

impl ContextInputs {
    /// Sensible defaults for everything but the sources and flags.
    pub fn new(catalog: AssetCatalog) -> Self {
        Self {
            explicit: HashMap::new(),
            flags: Vec::new(),
            launch: None,
            background: [255, 255, 255],
            prefix: "apple-touch-icon".into(),
            launch_prefix: "apple-launch-screen".into(),
            destination_dir: PathBuf::from("assets"),
            html_destination: PathBuf::from("."),
            html_file_name: "paste-content-in-site-head-tags.html".into(),
            emit_html: true,
            emit_manifest: true,
            write_images: true,
            catalog,
        }
    }
}

/// The aggregate root. Shared read-only across all categories and
/// resolutions; never mutated after construction.
#[derive(Debug)]
pub struct GenerationContext {
    pub catalog: AssetCatalog,
    pub sources: SourceSet,
    pub configs: Vec<GenerationConfig>,
    pub launch: Option<LaunchPlan>,
    pub background: [u8; 3],
    pub layout: OutputLayout,
    pub emit_html: bool,
    pub emit_manifest: bool,
    pub write_images: bool,
}

impl GenerationContext {
    pub fn build(mut inputs: ContextInputs) -> Result<Self, ConfigError> {
        // A missing base can be synthesized from the launch plan: either the
        // launch image itself or a color (+ optional logo) background.
        if !inputs.explicit.contains_key(&SourceKey::Base) {
            match &inputs.launch {
                Some(plan) => {
                    let synthesized = plan.source.to_source_image(1024, 1024);
                    inputs.explicit.insert(SourceKey::Base, synthesized);
                }
                None => return Err(ConfigError::NoBaseSource),
            }
        }

        validate_inputs(&inputs);

        let sources = SourceSet::resolve(std::mem::take(&mut inputs.explicit))?;

        let launch = if inputs.flags.contains(&IconFlag::LaunchScreens) {
            Some(inputs.launch.take().unwrap_or_else(|| LaunchPlan {
                source: LaunchSource::Image(sources.base().clone()),
                dark: None,
            }))
        } else {
            None
        };

        let configs: Vec<GenerationConfig> = IconFlag::ALL
            .into_iter()
            .filter(|flag| inputs.flags.contains(flag))
            .map(GenerationConfig::for_flag)
            .collect();

        let href_prefix = href_prefix(&inputs.destination_dir, &inputs.html_destination);
        info!(
            categories = configs.len(),
            destination = %inputs.destination_dir.display(),
            "generation context ready"
        );

        Ok(Self {
            catalog: inputs.catalog,
            sources,
            configs,
            launch,
            background: inputs.background,
            layout: OutputLayout {
                destination_dir: inputs.destination_dir,
                html_destination: inputs.html_destination,
                html_file_name: inputs.html_file_name,
                href_prefix,
                prefix: inputs.prefix,
                launch_prefix: inputs.launch_prefix,
            },
            emit_html: inputs.emit_html,
            emit_manifest: inputs.emit_manifest,
            write_images: inputs.write_images,
        })
    }
}

/// Input-quality checks. Warnings only; none of these aborts a run.
fn validate_inputs(inputs: &ContextInputs) {
    if let Some(base) = inputs.explicit.get(&SourceKey::Base) {
        if base.format() == SourceFormat::Raster {
            if let Some((w, h)) = raster_dimensions(base.data()) {
                if w < MIN_RASTER_EDGE || h < MIN_RASTER_EDGE {
                    warn!(
                        "raster base image is {w}x{h}; below the recommended \
                         {MIN_RASTER_EDGE}x{MIN_RASTER_EDGE}, large icons will upscale"
                    );
                }
                if w.abs_diff(h) > 1 {
                    warn!("base image is not square ({w}x{h}); output may distort");
                }
            }
        }
    }
    if inputs.flags.contains(&IconFlag::Masked)
        && !inputs.explicit.contains_key(&SourceKey::Masked)
    {
        info!(
            "no masked image supplied; the base icon will be used. Android masks \
             icons client-side: keep important content inside the central 80%"
        );
    }
}

fn raster_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    image::load_from_memory(data)
        .ok()
        .map(|img| (img.width(), img.height()))
}

/// Path prefix that makes hrefs resolve relative to the HTML destination.
///
/// When the destination dir sits under the HTML destination, hrefs use the
/// remaining path; otherwise they fall back to the destination dir's name.
fn href_prefix(destination_dir: &Path, html_destination: &Path) -> String {
    let relative = destination_dir
        .strip_prefix(html_destination)
        .unwrap_or_else(|_| {
            destination_dir
                .file_name()
                .map(Path::new)
                .unwrap_or(destination_dir)
        });
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
