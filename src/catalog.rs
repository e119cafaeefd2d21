//! Target-size catalog.
//!
//! The catalog is a static data table: named groups of target [`Resolution`]s
//! per platform/category, plus the Apple device table that launch-screen
//! resolutions and media queries derive from. The pipeline only ever selects
//! subsets from it; it never computes sizes.

use crate::error::ConfigError;
use serde::Deserialize;

/// The default catalog shipped with the crate.
const DEFAULT_DATA: &str = include_str!("../data/data.json");

/// A target size descriptor.
///
/// Width and height are independent (the 310x150 Windows tile is not square).
/// The label identifies the resolution within its size group and feeds output
/// naming and markup attributes; for launch screens it is paired with a
/// device media-query hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
    pub label: String,
    /// CSS media query for markup referencing this resolution, if any.
    pub media: Option<String>,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            label: format!("{width}x{height}"),
            media: None,
        }
    }

    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Parses a `WxH` pair like `1170x2532`.
    pub fn parse_pair(pair: &str) -> Result<Self, ConfigError> {
        let bad = || ConfigError::InvalidResolution(pair.to_string());
        let (w, h) = pair.trim().split_once('x').ok_or_else(bad)?;
        let width: u32 = w.parse().map_err(|_| bad())?;
        let height: u32 = h.parse().map_err(|_| bad())?;
        if width == 0 || height == 0 {
            return Err(bad());
        }
        Ok(Self::new(width, height))
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Named set of target resolutions associated with one platform/category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeGroup {
    TouchIcons,
    MacosIcons,
    MaskedIcons,
    MsTiles,
    LaunchScreens,
}

impl SizeGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            SizeGroup::TouchIcons => "touch-icons",
            SizeGroup::MacosIcons => "macos-icons",
            SizeGroup::MaskedIcons => "masked-icons",
            SizeGroup::MsTiles => "ms-tiles",
            SizeGroup::LaunchScreens => "launch-screens",
        }
    }
}

/// One Apple device: the source of a launch-screen resolution and its
/// media query.
#[derive(Debug, Clone)]
pub struct DeviceScreen {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub scale_factor: u32,
}

impl DeviceScreen {
    /// Logical (CSS point) width, `width / scale`.
    pub fn logical_width(&self) -> u32 {
        self.width / self.scale_factor
    }

    pub fn logical_height(&self) -> u32 {
        self.height / self.scale_factor
    }

    /// Media query matching this device in portrait orientation.
    pub fn media_query(&self) -> String {
        format!(
            "(device-width: {}px) and (device-height: {}px) and (-webkit-device-pixel-ratio: {})",
            self.logical_width(),
            self.logical_height(),
            self.scale_factor,
        )
    }
}

// Raw shapes mirroring the JSON layout.

#[derive(Deserialize)]
struct RawCatalog {
    apple: RawApple,
    android: RawAndroid,
    mstile: RawMsTile,
}

#[derive(Deserialize)]
struct RawApple {
    #[serde(rename = "iconSizes")]
    icon_sizes: Vec<u32>,
    #[serde(rename = "macOSIconSizes")]
    macos_icon_sizes: Vec<u32>,
    devices: Vec<RawDevice>,
}

#[derive(Deserialize)]
struct RawDevice {
    name: String,
    #[serde(rename = "actualResolution")]
    actual_resolution: String,
    #[serde(rename = "scaleFactor")]
    scale_factor: u32,
}

#[derive(Deserialize)]
struct RawAndroid {
    #[serde(rename = "maskedIconSizes")]
    masked_icon_sizes: Vec<u32>,
}

#[derive(Deserialize)]
struct RawMsTile {
    sizes: Vec<(u32, u32)>,
}

/// The loaded size/device catalog. Read-only after construction.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    touch_icons: Vec<Resolution>,
    macos_icons: Vec<Resolution>,
    masked_icons: Vec<Resolution>,
    ms_tiles: Vec<Resolution>,
    launch_screens: Vec<Resolution>,
    devices: Vec<DeviceScreen>,
}

impl AssetCatalog {
    /// Loads the catalog bundled with the crate.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_DATA)
    }

    /// The bundled catalog data as raw JSON, for `get-data`.
    pub fn embedded_json() -> &'static str {
        DEFAULT_DATA
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawCatalog = serde_json::from_str(json)?;

        let devices: Vec<DeviceScreen> = raw
            .apple
            .devices
            .into_iter()
            .map(|d| {
                let res = Resolution::parse_pair(&d.actual_resolution)?;
                // Logical sizes divide by the scale factor; zero would panic.
                if d.scale_factor == 0 {
                    return Err(ConfigError::InvalidScaleFactor { device: d.name });
                }
                Ok(DeviceScreen {
                    name: d.name,
                    width: res.width,
                    height: res.height,
                    scale_factor: d.scale_factor,
                })
            })
            .collect::<Result<_, ConfigError>>()?;

        // One launch screen per unique device resolution, catalog order.
        let mut launch_screens: Vec<Resolution> = Vec::new();
        for device in &devices {
            let res =
                Resolution::new(device.width, device.height).with_media(device.media_query());
            if !launch_screens.iter().any(|r| r.label == res.label) {
                launch_screens.push(res);
            }
        }

        let catalog = Self {
            touch_icons: raw.apple.icon_sizes.into_iter().map(Resolution::square).collect(),
            macos_icons: raw
                .apple
                .macos_icon_sizes
                .into_iter()
                .map(Resolution::square)
                .collect(),
            masked_icons: raw
                .android
                .masked_icon_sizes
                .into_iter()
                .map(Resolution::square)
                .collect(),
            ms_tiles: raw
                .mstile
                .sizes
                .into_iter()
                .map(|(w, h)| Resolution::new(w, h))
                .collect(),
            launch_screens,
            devices,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Ordered target resolutions for a size group.
    pub fn resolutions_for(&self, group: SizeGroup) -> &[Resolution] {
        match group {
            SizeGroup::TouchIcons => &self.touch_icons,
            SizeGroup::MacosIcons => &self.macos_icons,
            SizeGroup::MaskedIcons => &self.masked_icons,
            SizeGroup::MsTiles => &self.ms_tiles,
            SizeGroup::LaunchScreens => &self.launch_screens,
        }
    }

    pub fn devices(&self) -> &[DeviceScreen] {
        &self.devices
    }

    /// Resolutions within one size group must be unique by label.
    fn validate(&self) -> Result<(), ConfigError> {
        const GROUPS: [SizeGroup; 5] = [
            SizeGroup::TouchIcons,
            SizeGroup::MacosIcons,
            SizeGroup::MaskedIcons,
            SizeGroup::MsTiles,
            SizeGroup::LaunchScreens,
        ];
        for group in GROUPS {
            let resolutions = self.resolutions_for(group);
            if resolutions.is_empty() {
                return Err(ConfigError::EmptySizeGroup(group.as_str()));
            }
            for (i, res) in resolutions.iter().enumerate() {
                if resolutions[..i].iter().any(|r| r.label == res.label) {
                    return Err(ConfigError::DuplicateLabel {
                        group: group.as_str(),
                        label: res.label.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_loads() {
        let catalog = AssetCatalog::embedded().unwrap();
        assert!(!catalog.resolutions_for(SizeGroup::TouchIcons).is_empty());
        assert!(!catalog.resolutions_for(SizeGroup::LaunchScreens).is_empty());
    }

    #[test]
    fn ms_tiles_include_the_wide_tile() {
        let catalog = AssetCatalog::embedded().unwrap();
        let tiles = catalog.resolutions_for(SizeGroup::MsTiles);
        let wide = tiles.iter().find(|r| r.width == 310 && r.height == 150);
        assert!(wide.is_some(), "310x150 wide tile must be in the catalog");
        assert!(!wide.unwrap().is_square());
    }

    #[test]
    fn launch_screens_deduplicate_by_resolution() {
        // The device table has two 1640x2360 iPads; only one launch screen.
        let catalog = AssetCatalog::embedded().unwrap();
        let count = catalog
            .resolutions_for(SizeGroup::LaunchScreens)
            .iter()
            .filter(|r| r.label == "1640x2360")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn launch_screens_carry_media_queries() {
        let catalog = AssetCatalog::embedded().unwrap();
        for res in catalog.resolutions_for(SizeGroup::LaunchScreens) {
            let media = res.media.as_deref().expect("launch screen media query");
            assert!(media.contains("device-width"));
            assert!(media.contains("-webkit-device-pixel-ratio"));
        }
    }

    #[test]
    fn device_logical_size_divides_by_scale() {
        let device = DeviceScreen {
            name: "test".into(),
            width: 1170,
            height: 2532,
            scale_factor: 3,
        };
        assert_eq!(device.logical_width(), 390);
        assert_eq!(device.logical_height(), 844);
        assert!(device.media_query().contains("(device-width: 390px)"));
    }

    #[test]
    fn parse_pair_accepts_wxh() {
        let res = Resolution::parse_pair("310x150").unwrap();
        assert_eq!((res.width, res.height), (310, 150));
        assert_eq!(res.label, "310x150");
    }

    #[test]
    fn parse_pair_rejects_garbage() {
        assert!(Resolution::parse_pair("310:150:1").is_err());
        assert!(Resolution::parse_pair("0x150").is_err());
        assert!(Resolution::parse_pair("wide").is_err());
    }

    #[test]
    fn zero_scale_factor_is_rejected_at_load() {
        let json = r#"{
            "apple": {
                "iconSizes": [180],
                "macOSIconSizes": [512],
                "devices": [
                    { "name": "broken", "actualResolution": "750x1334", "scaleFactor": 0 }
                ]
            },
            "android": { "maskedIconSizes": [192] },
            "mstile": { "sizes": [[150, 150]] }
        }"#;
        let err = AssetCatalog::from_json(json).unwrap_err();
        match err {
            ConfigError::InvalidScaleFactor { device } => assert_eq!(device, "broken"),
            other => panic!("expected a scale-factor error, got {other}"),
        }
    }

    #[test]
    fn duplicate_labels_are_a_catalog_bug() {
        let json = r#"{
            "apple": {
                "iconSizes": [180, 180],
                "macOSIconSizes": [512],
                "devices": [
                    { "name": "d", "actualResolution": "750x1334", "scaleFactor": 2 }
                ]
            },
            "android": { "maskedIconSizes": [192] },
            "mstile": { "sizes": [[150, 150]] }
        }"#;
        let err = AssetCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateLabel { .. }));
    }
}
