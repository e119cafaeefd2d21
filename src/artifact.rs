//! Generated artifact records.
//!
//! One [`Artifact`] per generated file: the encoded PNG plus the structured
//! HTML-tag and manifest-entry data describing it. Markup serialization is a
//! thin `Display`; the pipeline itself only deals in structured records.

use crate::catalog::Resolution;
use serde::Serialize;

/// Structured HTML tag data for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlTag {
    Link {
        rel: &'static str,
        sizes: Option<String>,
        href: String,
        media: Option<String>,
    },
    Meta {
        name: String,
        content: String,
    },
}

impl std::fmt::Display for HtmlTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HtmlTag::Link {
                rel,
                sizes,
                href,
                media,
            } => {
                write!(f, "<link rel=\"{rel}\"")?;
                if let Some(sizes) = sizes {
                    write!(f, " sizes=\"{sizes}\"")?;
                }
                write!(f, " href=\"{href}\"")?;
                if let Some(media) = media {
                    write!(f, " media=\"{media}\"")?;
                }
                write!(f, ">")
            }
            HtmlTag::Meta { name, content } => {
                write!(f, "<meta name=\"{name}\" content=\"{content}\">")
            }
        }
    }
}

/// Structured manifest `icons` entry for one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: &'static str,
    /// Space-separated purpose list; omitted entirely when `any`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

/// One generated image file plus its markup records.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// File name within `subdir`, e.g. `apple-touch-icon-180x180.png`.
    pub file_name: String,
    /// Subdirectory below the destination dir ("" for the root).
    pub subdir: &'static str,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
    pub resolution: Resolution,
    /// Category name, for logs and the run summary.
    pub category: &'static str,
    pub html_tag: Option<HtmlTag>,
    pub manifest_entry: Option<ManifestEntry>,
}
