//! Persisting run results: image files, the HTML snippet, and the manifest
//! fragment.
//!
//! Everything here is write-only plumbing over a finished [`RunReport`].
//! Individual write failures degrade to warnings like render failures do,
//! so one unwritable file never aborts the rest of the run.

use crate::artifact::ManifestEntry;
use crate::context::OutputLayout;
use crate::error::Warning;
use crate::pipeline::RunReport;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// File name of the manifest `icons` fragment, written next to the images.
pub const MANIFEST_FILE_NAME: &str = "manifest-icons-fragment.json";

/// Writes every artifact's PNG under the destination dir, creating
/// subdirectories as needed. Returns one warning per failed file.
pub fn write_images(report: &RunReport, layout: &OutputLayout) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let mut written = 0usize;

    for artifact in &report.artifacts {
        let dir = if artifact.subdir.is_empty() {
            layout.destination_dir.clone()
        } else {
            layout.destination_dir.join(artifact.subdir)
        };
        let path = dir.join(&artifact.file_name);
        let result = fs::create_dir_all(&dir).and_then(|()| fs::write(&path, &artifact.png));
        match result {
            Ok(()) => written += 1,
            Err(err) => warnings.push(Warning::Output {
                category: artifact.category,
                label: artifact.resolution.label.clone(),
                file: path.display().to_string(),
                message: err.to_string(),
            }),
        }
    }

    info!(written, failed = warnings.len(), "image files written");
    warnings
}

/// Renders the head-tag snippet: every HTML tag in artifact order, wrapped
/// in guidance comments.
pub fn html_snippet(report: &RunReport) -> String {
    let mut out = String::from("<!-- Paste the tags below into your site's <head>. -->\n");
    for tag in report.html_tags() {
        out.push_str(&tag.to_string());
        out.push('\n');
    }
    out.push_str("<!-- End of generated tags. -->\n");
    out
}

#[derive(Serialize)]
struct ManifestFragment<'a> {
    icons: Vec<&'a ManifestEntry>,
}

/// Renders the manifest `icons` fragment as pretty-printed JSON.
pub fn manifest_fragment(report: &RunReport) -> Result<String, serde_json::Error> {
    let fragment = ManifestFragment {
        icons: report.manifest_entries(),
    };
    serde_json::to_string_pretty(&fragment)
}

/// Writes the HTML snippet to the configured destination. Skipped (returns
/// `None`) when the run produced no tags.
pub fn write_html_snippet(
    report: &RunReport,
    layout: &OutputLayout,
) -> Result<Option<PathBuf>, Warning> {
    if report.html_tags().is_empty() {
        return Ok(None);
    }
    let path = layout.html_destination.join(&layout.html_file_name);
    let write = fs::create_dir_all(&layout.html_destination)
        .and_then(|()| fs::write(&path, html_snippet(report)));
    match write {
        Ok(()) => {
            info!(path = %path.display(), "HTML snippet written");
            Ok(Some(path))
        }
        Err(err) => Err(Warning::Output {
            category: "HTML snippet",
            label: String::new(),
            file: path.display().to_string(),
            message: err.to_string(),
        }),
    }
}

/// Writes the manifest fragment into the destination dir. Skipped (returns
/// `None`) when no artifact carries a manifest entry.
pub fn write_manifest_fragment(
    report: &RunReport,
    layout: &OutputLayout,
) -> Result<Option<PathBuf>, Warning> {
    if report.manifest_entries().is_empty() {
        return Ok(None);
    }
    let path = layout.destination_dir.join(MANIFEST_FILE_NAME);
    let as_warning = |message: String| Warning::Output {
        category: "manifest fragment",
        label: String::new(),
        file: path.display().to_string(),
        message,
    };
    let json = manifest_fragment(report).map_err(|e| as_warning(e.to_string()))?;
    fs::create_dir_all(&layout.destination_dir)
        .and_then(|()| fs::write(&path, json))
        .map_err(|e| as_warning(e.to_string()))?;
    info!(path = %path.display(), "manifest fragment written");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{Artifact, HtmlTag};
    use crate::catalog::Resolution;

    fn layout_in(dir: &std::path::Path) -> OutputLayout {
        OutputLayout {
            destination_dir: dir.join("assets"),
            html_destination: dir.to_path_buf(),
            html_file_name: "paste-content-in-site-head-tags.html".into(),
            href_prefix: "assets".into(),
            prefix: "apple-touch-icon".into(),
            launch_prefix: "apple-launch-screen".into(),
        }
    }

    fn artifact(subdir: &'static str, file_name: &str) -> Artifact {
        Artifact {
            file_name: file_name.into(),
            subdir,
            png: vec![1, 2, 3],
            resolution: Resolution::square(180),
            category: "Apple Touch",
            html_tag: Some(HtmlTag::Link {
                rel: "apple-touch-icon",
                sizes: Some("180x180".into()),
                href: format!("assets/{file_name}"),
                media: None,
            }),
            manifest_entry: Some(ManifestEntry {
                src: format!("assets/{file_name}"),
                sizes: "180x180".into(),
                mime_type: "image/png",
                purpose: Some("maskable".into()),
            }),
        }
    }

    #[test]
    fn writes_images_into_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = layout_in(tmp.path());
        let report = RunReport {
            artifacts: vec![
                artifact("", "apple-touch-icon-180x180.png"),
                artifact("macos", "apple-touch-icon-macos-512x512.png"),
            ],
            warnings: vec![],
        };
        let warnings = write_images(&report, &layout);
        assert!(warnings.is_empty());
        assert!(tmp.path().join("assets/apple-touch-icon-180x180.png").exists());
        assert!(tmp
            .path()
            .join("assets/macos/apple-touch-icon-macos-512x512.png")
            .exists());
    }

    #[test]
    fn unwritable_file_degrades_to_a_warning() {
        let tmp = tempfile::tempdir().unwrap();
        let mut layout = layout_in(tmp.path());
        // A destination that is an existing file, not a directory.
        let blocker = tmp.path().join("blocked");
        fs::write(&blocker, b"x").unwrap();
        layout.destination_dir = blocker;
        let report = RunReport {
            artifacts: vec![artifact("", "a.png")],
            warnings: vec![],
        };
        let warnings = write_images(&report, &layout);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], Warning::Output { .. }));
    }

    #[test]
    fn html_snippet_lists_tags_between_comments() {
        let report = RunReport {
            artifacts: vec![artifact("", "a.png")],
            warnings: vec![],
        };
        let snippet = html_snippet(&report);
        assert!(snippet.starts_with("<!--"));
        assert!(snippet.contains("<link rel=\"apple-touch-icon\""));
        assert!(snippet.trim_end().ends_with("-->"));
    }

    #[test]
    fn snippet_and_fragment_are_skipped_when_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = layout_in(tmp.path());
        let report = RunReport::default();
        assert!(write_html_snippet(&report, &layout).unwrap().is_none());
        assert!(write_manifest_fragment(&report, &layout).unwrap().is_none());
        assert!(!tmp.path().join(layout.html_file_name).exists());
    }

    #[test]
    fn manifest_fragment_nests_entries_under_icons() {
        let report = RunReport {
            artifacts: vec![artifact("", "a.png")],
            warnings: vec![],
        };
        let json = manifest_fragment(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["icons"][0]["sizes"], "180x180");
        assert_eq!(value["icons"][0]["type"], "image/png");
        assert_eq!(value["icons"][0]["purpose"], "maskable");
    }

    #[test]
    fn manifest_fragment_is_written_into_the_destination_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = layout_in(tmp.path());
        let report = RunReport {
            artifacts: vec![artifact("", "a.png")],
            warnings: vec![],
        };
        let path = write_manifest_fragment(&report, &layout).unwrap().unwrap();
        assert_eq!(path, tmp.path().join("assets").join(MANIFEST_FILE_NAME));
        assert!(path.exists());
    }
}
