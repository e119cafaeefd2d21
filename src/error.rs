//! Error taxonomy for the generation pipeline.
//!
//! Two tiers: [`ConfigError`] is fatal and aborts a run before any rendering
//! begins. [`Warning`] covers recoverable per-category and per-artifact
//! conditions; warnings are collected into the run report and presented as a
//! consolidated summary instead of aborting sibling work.

use crate::render::RenderError;
use crate::source::SourceKey;
use thiserror::Error;

/// Fatal configuration errors. No side effects have happened when one of
/// these is raised.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no base image available: supply a base icon, or a color (and optional logo) to synthesize one")]
    NoBaseSource,

    #[error("size group `{0}` has no resolutions in the catalog")]
    EmptySizeGroup(&'static str),

    #[error("duplicate resolution label `{label}` in size group `{group}`")]
    DuplicateLabel { group: &'static str, label: String },

    #[error("invalid catalog data: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("invalid resolution `{0}`: expected a pair like `1170x2532`")]
    InvalidResolution(String),

    #[error("invalid scale factor for device `{device}`: must be at least 1")]
    InvalidScaleFactor { device: String },

    #[error("invalid color `{0}`: expected hex like `#rrggbb` or `#rgb`")]
    InvalidColor(String),

    #[error("could not read `{path}`: {source}")]
    ReadInput {
        path: String,
        source: std::io::Error,
    },

    #[error("could not write `{path}`: {source}")]
    WriteOutput {
        path: String,
        source: std::io::Error,
    },
}

/// Recoverable conditions recorded during a run.
///
/// A warning never aborts the run; the affected category or artifact is
/// skipped and everything else proceeds.
#[derive(Debug, Error)]
pub enum Warning {
    /// A category's source key resolved to nothing. The whole category is
    /// skipped and produces zero artifacts.
    #[error("{category}: no source image resolved for key `{key}`; category skipped")]
    SourceUnresolved {
        category: &'static str,
        key: SourceKey,
    },

    /// One (source, resolution) render or transform step failed.
    #[error("{category} {label}: {source}")]
    Render {
        category: &'static str,
        label: String,
        source: RenderError,
    },

    /// A rendered artifact could not be persisted.
    #[error("{category} {label}: could not write `{file}`: {message}")]
    Output {
        category: &'static str,
        label: String,
        file: String,
        message: String,
    },
}
