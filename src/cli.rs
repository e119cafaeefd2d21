//! Command-line interface definitions and the mapping from parsed
//! arguments to a [`ContextInputs`].
//!
//! Argument parsing stays declarative; everything that can fail (reading
//! source files, parsing colors, loading an alternate catalog) funnels
//! through [`build_inputs`] so the binary has a single fatal-error path.

use crate::catalog::AssetCatalog;
use crate::config::IconFlag;
use crate::context::ContextInputs;
use crate::error::ConfigError;
use crate::launch::{LaunchPlan, LaunchSource};
use crate::source::{SourceImage, SourceKey};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Top-level command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the icon categories (touch, masked, monochrome, dark,
    /// tinted, macOS, tiles) plus their head tags and manifest fragment.
    GenerateIcons {
        #[command(flatten)]
        sources: SourceArgs,
        #[command(flatten)]
        toggles: IconToggleArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate launch screens only.
    GenerateLaunchScreens {
        #[command(flatten)]
        sources: SourceArgs,
        #[command(flatten)]
        launch: LaunchArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate icons and launch screens in one run.
    Generate {
        #[command(flatten)]
        sources: SourceArgs,
        #[command(flatten)]
        toggles: IconToggleArgs,
        #[command(flatten)]
        launch: LaunchArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write (or print) the bundled size/device catalog, for use with
    /// `--alternate-data` after editing.
    GetData {
        /// Print the catalog to stdout instead of writing a file.
        #[arg(long)]
        print: bool,

        /// Directory to write `data.json` into.
        #[arg(default_value = ".")]
        destination: PathBuf,
    },
}

/// Source images per role. Only the base icon is positional; everything
/// else falls back along its role's chain when omitted.
#[derive(Debug, Parser)]
pub struct SourceArgs {
    /// Base icon image (SVG, PNG, JPEG, or WebP).
    pub icon: Option<PathBuf>,

    /// Image for Android maskable icons (full-bleed, safe zone centered).
    #[arg(long)]
    pub masked_icon: Option<PathBuf>,

    /// Image for Android monochrome icons.
    #[arg(long)]
    pub masked_monochrome_icon: Option<PathBuf>,

    /// Image for iOS dark-mode icons (transparent background).
    #[arg(long)]
    pub apple_darkmode_icon: Option<PathBuf>,

    /// Image for iOS tinted icons.
    #[arg(long)]
    pub apple_tinted_icon: Option<PathBuf>,

    /// Image for the wide Windows tile.
    #[arg(long)]
    pub tile_rect_image: Option<PathBuf>,
}

/// Per-category disable switches. Everything is on by default.
#[derive(Debug, Parser)]
pub struct IconToggleArgs {
    /// Skip Android maskable icons.
    #[arg(long)]
    pub no_masked: bool,

    /// Skip Android monochrome icons.
    #[arg(long)]
    pub no_monochrome: bool,

    /// Skip iOS dark-mode icons.
    #[arg(long)]
    pub no_darkmode: bool,

    /// Skip iOS tinted icons.
    #[arg(long)]
    pub no_tinted: bool,

    /// Skip macOS icons.
    #[arg(long)]
    pub no_macos: bool,

    /// Skip Windows tiles.
    #[arg(long)]
    pub no_ms_tiles: bool,
}

/// Launch-screen inputs.
#[derive(Debug, Parser)]
pub struct LaunchArgs {
    /// Rectangular launch-screen image, stretched per device.
    #[arg(long)]
    pub launch_screen_image: Option<PathBuf>,

    /// Dark-mode variant of the launch-screen image.
    #[arg(long)]
    pub launch_darkmode_image: Option<PathBuf>,

    /// Synthesize screens from a background color and an optional
    /// centered logo instead of an image.
    #[arg(long, num_args = 1..=2, value_names = ["COLOR", "LOGO"])]
    pub colored_logo: Option<Vec<String>>,

    /// Also generate dark variants (from the dark image when given,
    /// otherwise from the light source).
    #[arg(long)]
    pub generate_darkmode: bool,

    /// File-name prefix for launch screens.
    #[arg(long, default_value = "apple-launch-screen")]
    pub launch_screen_base_name: String,
}

/// Output locations, naming, and emission switches.
#[derive(Debug, Parser)]
pub struct OutputArgs {
    /// Directory the generated images go into.
    #[arg(long, default_value = "assets")]
    pub destination_dir: PathBuf,

    /// Directory the HTML snippet goes into; hrefs are made relative
    /// to it.
    #[arg(long, default_value = ".")]
    pub html_destination: PathBuf,

    /// File name of the HTML snippet.
    #[arg(long, default_value = "paste-content-in-site-head-tags.html")]
    pub html_file_name: String,

    /// File-name prefix for icons.
    #[arg(long, default_value = "apple-touch-icon")]
    pub prefix: String,

    /// Background color used when flattening transparency, as `#rgb`
    /// or `#rrggbb`.
    #[arg(long, default_value = "#ffffff")]
    pub background_color: String,

    /// Skip the HTML snippet.
    #[arg(long)]
    pub no_html: bool,

    /// Skip the manifest fragment.
    #[arg(long)]
    pub no_manifest: bool,

    /// Produce markup only; write no image files.
    #[arg(long)]
    pub no_icons: bool,

    /// Path to an edited catalog (see `get-data`) replacing the
    /// bundled one.
    #[arg(long)]
    pub alternate_data: Option<PathBuf>,
}

/// Parses `#rgb` or `#rrggbb` (the leading `#` is optional).
pub fn parse_hex_color(input: &str) -> Result<[u8; 3], ConfigError> {
    let bad = || ConfigError::InvalidColor(input.to_string());
    let hex = input.trim().trim_start_matches('#');
    let expand = |c: u8| (c << 4) | c;
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16).ok_or_else(bad)? as u8;
                out[i] = expand(v);
            }
            Ok(out)
        }
        6 => {
            let mut out = [0u8; 3];
            for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
                let s = std::str::from_utf8(chunk).map_err(|_| bad())?;
                out[i] = u8::from_str_radix(s, 16).map_err(|_| bad())?;
            }
            Ok(out)
        }
        _ => Err(bad()),
    }
}

fn read_source(path: &Path) -> Result<SourceImage, ConfigError> {
    let data = fs::read(path).map_err(|source| ConfigError::ReadInput {
        path: path.display().to_string(),
        source,
    })?;
    Ok(SourceImage::from_named_bytes(
        &path.to_string_lossy(),
        data,
    ))
}

fn load_catalog(alternate: Option<&Path>) -> Result<AssetCatalog, ConfigError> {
    match alternate {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| ConfigError::ReadInput {
                path: path.display().to_string(),
                source,
            })?;
            AssetCatalog::from_json(&json)
        }
        None => AssetCatalog::embedded(),
    }
}

fn icon_flags(toggles: &IconToggleArgs) -> Vec<IconFlag> {
    let mut flags = vec![IconFlag::AppleTouch];
    if !toggles.no_masked {
        flags.push(IconFlag::Masked);
    }
    if !toggles.no_monochrome {
        flags.push(IconFlag::Monochrome);
    }
    if !toggles.no_darkmode {
        flags.push(IconFlag::Darkmode);
    }
    if !toggles.no_tinted {
        flags.push(IconFlag::Tinted);
    }
    if !toggles.no_macos {
        flags.push(IconFlag::Macos);
    }
    if !toggles.no_ms_tiles {
        flags.push(IconFlag::MsTiles);
    }
    flags
}

fn launch_plan(args: &LaunchArgs) -> Result<Option<LaunchPlan>, ConfigError> {
    let source = if let Some(spec) = &args.colored_logo {
        let color = parse_hex_color(&spec[0])?;
        let logo = match spec.get(1) {
            Some(path) => Some(Arc::new(read_source(Path::new(path))?)),
            None => None,
        };
        Some(LaunchSource::ColoredLogo { color, logo })
    } else {
        args.launch_screen_image
            .as_deref()
            .map(|path| read_source(path).map(|img| LaunchSource::Image(Arc::new(img))))
            .transpose()?
    };

    let Some(source) = source else {
        return Ok(None);
    };

    let dark = if let Some(path) = &args.launch_darkmode_image {
        Some(LaunchSource::Image(Arc::new(read_source(path)?)))
    } else if args.generate_darkmode {
        Some(source.clone())
    } else {
        None
    };

    Ok(Some(LaunchPlan { source, dark }))
}

fn apply_sources(
    inputs: &mut ContextInputs,
    sources: &SourceArgs,
) -> Result<(), ConfigError> {
    let pairs: [(SourceKey, Option<&PathBuf>); 6] = [
        (SourceKey::Base, sources.icon.as_ref()),
        (SourceKey::Masked, sources.masked_icon.as_ref()),
        (SourceKey::Monochrome, sources.masked_monochrome_icon.as_ref()),
        (SourceKey::Dark, sources.apple_darkmode_icon.as_ref()),
        (SourceKey::Tinted, sources.apple_tinted_icon.as_ref()),
        (SourceKey::TileRectangle, sources.tile_rect_image.as_ref()),
    ];
    for (key, path) in pairs {
        if let Some(path) = path {
            inputs.explicit.insert(key, read_source(path)?);
        }
    }
    Ok(())
}

fn apply_output(inputs: &mut ContextInputs, output: &OutputArgs) -> Result<(), ConfigError> {
    inputs.background = parse_hex_color(&output.background_color)?;
    inputs.prefix = output.prefix.clone();
    inputs.destination_dir = output.destination_dir.clone();
    inputs.html_destination = output.html_destination.clone();
    inputs.html_file_name = output.html_file_name.clone();
    inputs.emit_html = !output.no_html;
    inputs.emit_manifest = !output.no_manifest;
    inputs.write_images = !output.no_icons;
    Ok(())
}

/// Turns a parsed generation subcommand into context inputs. `get-data`
/// never reaches here.
pub fn build_inputs(command: &Command) -> Result<ContextInputs, ConfigError> {
    let (sources, toggles, launch, output) = match command {
        Command::GenerateIcons {
            sources,
            toggles,
            output,
        } => (sources, Some(toggles), None, output),
        Command::GenerateLaunchScreens {
            sources,
            launch,
            output,
        } => (sources, None, Some(launch), output),
        Command::Generate {
            sources,
            toggles,
            launch,
            output,
        } => (sources, Some(toggles), Some(launch), output),
        Command::GetData { .. } => unreachable!("get-data has no generation inputs"),
    };

    let catalog = load_catalog(output.alternate_data.as_deref())?;
    let mut inputs = ContextInputs::new(catalog);

    apply_sources(&mut inputs, sources)?;
    apply_output(&mut inputs, output)?;

    inputs.flags = toggles.map(icon_flags).unwrap_or_default();
    if let Some(launch) = launch {
        inputs.flags.push(IconFlag::LaunchScreens);
        inputs.launch = launch_plan(launch)?;
        inputs.launch_prefix = launch.launch_screen_base_name.clone();
    }

    Ok(inputs)
}
