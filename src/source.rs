//! Source image roles and fallback resolution.
//!
//! Every generated category pulls its pixels from one [`SourceKey`]. Users
//! rarely supply an image for every key, so each non-base key carries a
//! constant ordered fallback chain consulted when no explicit image exists.
//! All chains terminate at [`SourceKey::Base`], which is mandatory.

use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Logical role a source image plays in generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKey {
    Base,
    Masked,
    Monochrome,
    Dark,
    Tinted,
    TileRectangle,
}

impl SourceKey {
    pub const ALL: [SourceKey; 6] = [
        SourceKey::Base,
        SourceKey::Masked,
        SourceKey::Monochrome,
        SourceKey::Dark,
        SourceKey::Tinted,
        SourceKey::TileRectangle,
    ];

    /// Keys that resolve through a fallback chain (everything but `Base`).
    pub const DERIVED: [SourceKey; 5] = [
        SourceKey::Masked,
        SourceKey::Monochrome,
        SourceKey::Dark,
        SourceKey::Tinted,
        SourceKey::TileRectangle,
    ];

    /// Ordered preference of substitute keys consulted when no explicit
    /// image was supplied for this key. `Base` ends every chain and is
    /// implied, so it is listed explicitly only where it is the sole entry.
    pub fn fallback_chain(self) -> &'static [SourceKey] {
        match self {
            SourceKey::Base => &[],
            SourceKey::Masked => &[SourceKey::Base],
            SourceKey::Monochrome => &[SourceKey::Masked, SourceKey::Base],
            SourceKey::Dark => &[SourceKey::Base],
            SourceKey::Tinted => &[SourceKey::Dark, SourceKey::Base],
            SourceKey::TileRectangle => &[SourceKey::Base],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceKey::Base => "base",
            SourceKey::Masked => "masked",
            SourceKey::Monochrome => "monochrome",
            SourceKey::Dark => "dark",
            SourceKey::Tinted => "tinted",
            SourceKey::TileRectangle => "tile-rectangle",
        }
    }
}

impl std::fmt::Display for SourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a source is vector markup or raster pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Vector,
    Raster,
}

/// An immutable source image: raw bytes plus a format tag.
///
/// Produced once during context construction and shared by reference across
/// every category that resolves to the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    data: Vec<u8>,
    format: SourceFormat,
}

impl SourceImage {
    pub fn new(data: Vec<u8>, format: SourceFormat) -> Self {
        Self { data, format }
    }

    pub fn vector(markup: impl Into<String>) -> Self {
        Self::new(markup.into().into_bytes(), SourceFormat::Vector)
    }

    /// Tags the format from the file name's extension, falling back to a
    /// content sniff when the extension is absent or unknown.
    pub fn from_named_bytes(name: &str, data: Vec<u8>) -> Self {
        let format = match Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("svg") => SourceFormat::Vector,
            Some("png" | "jpg" | "jpeg" | "webp") => SourceFormat::Raster,
            _ => sniff_format(&data),
        };
        Self::new(data, format)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn is_vector(&self) -> bool {
        self.format == SourceFormat::Vector
    }
}

/// Vector if the bytes start like SVG markup, raster otherwise.
fn sniff_format(data: &[u8]) -> SourceFormat {
    let head = &data[..data.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let trimmed = text.trim_start();
    if trimmed.starts_with("<svg") || trimmed.starts_with("<?xml") {
        SourceFormat::Vector
    } else {
        SourceFormat::Raster
    }
}

/// Complete mapping from every [`SourceKey`] to a resolved [`SourceImage`].
#[derive(Debug, Clone)]
pub struct SourceSet {
    images: HashMap<SourceKey, Arc<SourceImage>>,
}

impl SourceSet {
    /// Resolves the full key set from the explicitly supplied images.
    ///
    /// Pure and deterministic: for each derived key, an explicit image wins;
    /// otherwise the first explicit match along the key's fallback chain is
    /// substituted; otherwise `Base`. Fails only when `Base` itself is
    /// missing.
    pub fn resolve(
        explicit: HashMap<SourceKey, SourceImage>,
    ) -> Result<Self, ConfigError> {
        let explicit: HashMap<SourceKey, Arc<SourceImage>> = explicit
            .into_iter()
            .map(|(k, v)| (k, Arc::new(v)))
            .collect();

        let base = explicit
            .get(&SourceKey::Base)
            .cloned()
            .ok_or(ConfigError::NoBaseSource)?;

        let mut images = HashMap::with_capacity(SourceKey::ALL.len());
        images.insert(SourceKey::Base, Arc::clone(&base));

        for key in SourceKey::DERIVED {
            let resolved = explicit
                .get(&key)
                .or_else(|| {
                    key.fallback_chain()
                        .iter()
                        .find_map(|alternate| explicit.get(alternate))
                })
                .unwrap_or(&base);
            images.insert(key, Arc::clone(resolved));
        }

        Ok(Self { images })
    }

    /// Wraps an already-resolved mapping. Callers are responsible for
    /// completeness; [`SourceSet::resolve`] is the normal entry point.
    pub fn from_resolved(images: HashMap<SourceKey, Arc<SourceImage>>) -> Self {
        Self { images }
    }

    pub fn get(&self, key: SourceKey) -> Option<&Arc<SourceImage>> {
        self.images.get(&key)
    }

    pub fn base(&self) -> &Arc<SourceImage> {
        // Base is guaranteed present by construction.
        &self.images[&SourceKey::Base]
    }
}
