//! Static category configuration table.
//!
//! One [`GenerationConfig`] record per feature flag describes everything
//! that varies per category: which source key, which size group, which
//! post-processing transforms, how the output is named, and which markup
//! records come out. Consumers treat this table as the single source of
//! truth; adding a platform requirement means adding one row here.

use crate::catalog::SizeGroup;
use crate::source::SourceKey;

/// Post-processing requirements for one category.
///
/// Transforms apply in a fixed order: desaturate, then opaque, then
/// transparent, then clip. Each flag is defined relative to the previous
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transforms {
    /// Convert to grayscale, preserving alpha.
    pub desaturate: bool,
    /// Flatten transparency onto an opaque background.
    pub opaque: bool,
    /// Keep the background transparent (dark-mode and tinted icons).
    pub transparent: bool,
    /// Clip pixels to the macOS rounded-square shape. Android masked icons
    /// do NOT set this: Android masks client-side, so the flag there only
    /// implies the documented content-safe-zone, never a pixel operation.
    pub clip: bool,
}

/// Manifest `purpose` attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestPurpose {
    Maskable,
    Monochrome,
    Any,
}

impl ManifestPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            ManifestPurpose::Maskable => "maskable",
            ManifestPurpose::Monochrome => "monochrome",
            ManifestPurpose::Any => "any",
        }
    }
}

/// Which HTML record a category's artifacts produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlStyle {
    /// `<link rel="apple-touch-icon" ...>`
    TouchIcon,
    /// Touch icon link with a dark-mode media query.
    DarkTouchIcon,
    /// `msapplication-*logo` meta tag.
    MsTileMeta,
    /// `<link rel="apple-touch-startup-image" ...>` with a device media query.
    StartupImage,
    /// No HTML output for this category.
    None,
}

/// Icon categories versus launch screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Icon,
    LaunchScreen,
}

/// Feature flags selecting which categories a run generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconFlag {
    AppleTouch,
    Masked,
    Monochrome,
    Darkmode,
    Tinted,
    Macos,
    MsTiles,
    LaunchScreens,
}

impl IconFlag {
    /// All flags in generation (and output) order.
    pub const ALL: [IconFlag; 8] = [
        IconFlag::AppleTouch,
        IconFlag::Masked,
        IconFlag::Monochrome,
        IconFlag::Darkmode,
        IconFlag::Tinted,
        IconFlag::Macos,
        IconFlag::MsTiles,
        IconFlag::LaunchScreens,
    ];
}

/// Fixed-shape configuration record for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    pub flag: IconFlag,
    /// Human-readable category name, used in logs and warnings.
    pub name: &'static str,
    pub kind: CategoryKind,
    pub source_key: SourceKey,
    pub size_group: SizeGroup,
    pub transforms: Transforms,
    /// Manifest purposes; empty means the category is not manifested.
    pub purposes: &'static [ManifestPurpose],
    /// Output subdirectory below the destination dir ("" for the root).
    pub subdir: &'static str,
    /// File-stem suffix appended to the naming prefix ("" for none).
    pub stem_suffix: &'static str,
    pub html: HtmlStyle,
}

impl GenerationConfig {
    /// The configuration row for a flag. This is the whole table.
    pub const fn for_flag(flag: IconFlag) -> Self {
        match flag {
            IconFlag::AppleTouch => Self {
                flag,
                name: "Apple Touch",
                kind: CategoryKind::Icon,
                source_key: SourceKey::Base,
                size_group: SizeGroup::TouchIcons,
                transforms: Transforms {
                    desaturate: false,
                    opaque: true,
                    transparent: false,
                    clip: false,
                },
                purposes: &[],
                subdir: "",
                stem_suffix: "",
                html: HtmlStyle::TouchIcon,
            },
            IconFlag::Masked => Self {
                flag,
                name: "Android Masked",
                kind: CategoryKind::Icon,
                source_key: SourceKey::Masked,
                size_group: SizeGroup::MaskedIcons,
                transforms: Transforms {
                    desaturate: false,
                    opaque: true,
                    transparent: false,
                    clip: false,
                },
                purposes: &[ManifestPurpose::Maskable],
                subdir: "masked",
                stem_suffix: "android-masked",
                html: HtmlStyle::None,
            },
            IconFlag::Monochrome => Self {
                flag,
                name: "Android Monochrome",
                kind: CategoryKind::Icon,
                source_key: SourceKey::Monochrome,
                size_group: SizeGroup::MaskedIcons,
                transforms: Transforms {
                    desaturate: true,
                    opaque: true,
                    transparent: false,
                    clip: false,
                },
                purposes: &[ManifestPurpose::Maskable, ManifestPurpose::Monochrome],
                subdir: "masked/monochrome",
                stem_suffix: "android-monochrome",
                html: HtmlStyle::None,
            },
            IconFlag::Darkmode => Self {
                flag,
                name: "Apple Dark Mode",
                kind: CategoryKind::Icon,
                source_key: SourceKey::Dark,
                size_group: SizeGroup::TouchIcons,
                transforms: Transforms {
                    desaturate: false,
                    opaque: false,
                    transparent: true,
                    clip: false,
                },
                purposes: &[],
                subdir: "darkmode",
                stem_suffix: "apple-dark-mode",
                html: HtmlStyle::DarkTouchIcon,
            },
            IconFlag::Tinted => Self {
                flag,
                name: "Apple Tinted",
                kind: CategoryKind::Icon,
                source_key: SourceKey::Tinted,
                size_group: SizeGroup::TouchIcons,
                transforms: Transforms {
                    desaturate: true,
                    opaque: false,
                    transparent: true,
                    clip: false,
                },
                purposes: &[ManifestPurpose::Monochrome],
                subdir: "tinted",
                stem_suffix: "apple-tinted",
                html: HtmlStyle::None,
            },
            IconFlag::Macos => Self {
                flag,
                name: "macOS",
                kind: CategoryKind::Icon,
                source_key: SourceKey::Base,
                size_group: SizeGroup::MacosIcons,
                transforms: Transforms {
                    desaturate: false,
                    opaque: true,
                    transparent: false,
                    clip: true,
                },
                purposes: &[ManifestPurpose::Any],
                subdir: "macos",
                stem_suffix: "macos",
                html: HtmlStyle::None,
            },
            IconFlag::MsTiles => Self {
                flag,
                name: "MS Tiles",
                kind: CategoryKind::Icon,
                source_key: SourceKey::TileRectangle,
                size_group: SizeGroup::MsTiles,
                transforms: Transforms {
                    desaturate: false,
                    opaque: true,
                    transparent: false,
                    clip: false,
                },
                purposes: &[],
                subdir: "mstile",
                stem_suffix: "ms-tiles",
                html: HtmlStyle::MsTileMeta,
            },
            IconFlag::LaunchScreens => Self {
                flag,
                name: "Launch Screens",
                kind: CategoryKind::LaunchScreen,
                source_key: SourceKey::Base,
                size_group: SizeGroup::LaunchScreens,
                transforms: Transforms {
                    desaturate: false,
                    opaque: true,
                    transparent: false,
                    clip: false,
                },
                purposes: &[],
                subdir: "launch-screens",
                stem_suffix: "",
                html: HtmlStyle::StartupImage,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_flag_has_a_row() {
        for flag in IconFlag::ALL {
            let config = GenerationConfig::for_flag(flag);
            assert_eq!(config.flag, flag);
            assert!(!config.name.is_empty());
        }
    }

    #[test]
    fn tinted_requires_desaturate_and_transparency() {
        let t = GenerationConfig::for_flag(IconFlag::Tinted).transforms;
        assert!(t.desaturate && t.transparent);
        assert!(!t.opaque && !t.clip);
    }

    #[test]
    fn only_macos_clips_pixels() {
        for flag in IconFlag::ALL {
            let config = GenerationConfig::for_flag(flag);
            assert_eq!(
                config.transforms.clip,
                flag == IconFlag::Macos,
                "{:?}",
                flag
            );
        }
    }

    #[test]
    fn opaque_and_transparent_are_mutually_exclusive() {
        for flag in IconFlag::ALL {
            let t = GenerationConfig::for_flag(flag).transforms;
            assert!(!(t.opaque && t.transparent), "{flag:?}");
        }
    }

    #[test]
    fn monochrome_is_maskable_and_monochrome() {
        let config = GenerationConfig::for_flag(IconFlag::Monochrome);
        assert_eq!(
            config.purposes,
            &[ManifestPurpose::Maskable, ManifestPurpose::Monochrome]
        );
    }

    #[test]
    fn monochrome_ships_with_the_android_masked_family() {
        // Monochrome is an Android manifest asset; it tracks the masked
        // sizes and sits under the masked directory, not the Apple set.
        let config = GenerationConfig::for_flag(IconFlag::Monochrome);
        assert_eq!(config.size_group, SizeGroup::MaskedIcons);
        assert_eq!(config.subdir, "masked/monochrome");
    }

    #[test]
    fn apple_categories_are_not_manifested() {
        assert!(GenerationConfig::for_flag(IconFlag::AppleTouch).purposes.is_empty());
        assert!(GenerationConfig::for_flag(IconFlag::Darkmode).purposes.is_empty());
    }

    #[test]
    fn launch_screens_are_the_only_launch_kind() {
        for flag in IconFlag::ALL {
            let config = GenerationConfig::for_flag(flag);
            assert_eq!(
                config.kind == CategoryKind::LaunchScreen,
                flag == IconFlag::LaunchScreens
            );
        }
    }
}
