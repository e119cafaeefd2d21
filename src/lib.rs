//! iconweave: PWA icon and launch-screen asset generation
//!
//! This crate turns one or more source images into the full matrix of
//! icon and launch-screen assets a progressive web app needs across
//! Apple, Android, and Windows, together with the HTML head tags and
//! web-manifest entries that reference them.
//!
//! The flow is: resolve the supplied images into a complete role set
//! ([`source::SourceSet`]), build a [`context::GenerationContext`] from
//! the CLI-level inputs, run [`pipeline::run_pipeline`] to render every
//! active category at every catalog resolution, and persist the results
//! through [`output`].
//!
//! # Example
//!
//! ```no_run
//! use iconweave::catalog::AssetCatalog;
//! use iconweave::config::IconFlag;
//! use iconweave::context::{ContextInputs, GenerationContext};
//! use iconweave::pipeline::run_pipeline;
//! use iconweave::render::ResvgBackend;
//! use iconweave::source::{SourceImage, SourceKey};
//!
//! # fn main() -> Result<(), iconweave::error::ConfigError> {
//! let mut inputs = ContextInputs::new(AssetCatalog::embedded()?);
//! inputs.explicit.insert(
//!     SourceKey::Base,
//!     SourceImage::from_named_bytes("icon.svg", std::fs::read("icon.svg").unwrap()),
//! );
//! inputs.flags = vec![IconFlag::AppleTouch, IconFlag::Macos];
//!
//! let ctx = GenerationContext::build(inputs)?;
//! let report = run_pipeline(&ctx, &ResvgBackend);
//! assert!(report.warnings.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod launch;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod source;

pub use artifact::{Artifact, HtmlTag, ManifestEntry};
pub use catalog::{AssetCatalog, Resolution, SizeGroup};
pub use config::{GenerationConfig, IconFlag, Transforms};
pub use context::{ContextInputs, GenerationContext};
pub use error::{ConfigError, Warning};
pub use launch::{LaunchPlan, LaunchSource};
pub use pipeline::{run_pipeline, RunReport};
pub use render::{RenderBackend, RenderError, ResvgBackend};
pub use source::{SourceImage, SourceKey, SourceSet};
