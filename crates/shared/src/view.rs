//! Top-level view and viewport classification.

use serde::{Deserialize, Serialize};

/// Which top-level screen is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Chat,
}

/// Fine-grained device class derived from viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceType {
    MobileSmall,
    Mobile,
    MobileLarge,
    Tablet,
    TabletLarge,
    Desktop,
    DesktopLarge,
}

/// Coarse device class; selects which layout tree is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceCategory {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceCategory::Mobile => "mobile",
            DeviceCategory::Tablet => "tablet",
            DeviceCategory::Desktop => "desktop",
        }
    }
}

/// Minimum width (px) at which each device type starts.
pub const BREAKPOINTS: [(DeviceType, u32); 7] = [
    (DeviceType::MobileSmall, 0),
    (DeviceType::Mobile, 375),
    (DeviceType::MobileLarge, 430),
    (DeviceType::Tablet, 640),
    (DeviceType::TabletLarge, 1024),
    (DeviceType::Desktop, 1280),
    (DeviceType::DesktopLarge, 1920),
];

impl DeviceType {
    pub fn from_width(width: u32) -> Self {
        BREAKPOINTS
            .iter()
            .rev()
            .find(|(_, min)| width >= *min)
            .map(|(device, _)| *device)
            .unwrap_or(DeviceType::MobileSmall)
    }

    pub fn category(&self) -> DeviceCategory {
        match self {
            DeviceType::MobileSmall | DeviceType::Mobile | DeviceType::MobileLarge => {
                DeviceCategory::Mobile
            }
            DeviceType::Tablet | DeviceType::TabletLarge => DeviceCategory::Tablet,
            DeviceType::Desktop | DeviceType::DesktopLarge => DeviceCategory::Desktop,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::MobileSmall => "mobile-small",
            DeviceType::Mobile => "mobile",
            DeviceType::MobileLarge => "mobile-large",
            DeviceType::Tablet => "tablet",
            DeviceType::TabletLarge => "tablet-large",
            DeviceType::Desktop => "desktop",
            DeviceType::DesktopLarge => "desktop-large",
        }
    }
}

/// Viewport dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn device_type(&self) -> DeviceType {
        DeviceType::from_width(self.width)
    }

    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}
