//! Rendering style: scale, quiet zone and module colors

use crate::error::{Error, Result};
use crate::qr::Color;
use serde::{Deserialize, Serialize};

/// Default pixels per module
pub const DEFAULT_SCALE: u32 = 7;
/// Default quiet zone width in modules
pub const DEFAULT_BORDER: u32 = 2;
/// Teal, like Kiki's dress
pub const DEFAULT_DARK: Color = Color::rgb(0x00, 0x79, 0x6b);
/// Soft cream background
pub const DEFAULT_LIGHT: Color = Color::rgb(0xfd, 0xf6, 0xe3);
/// Amber, like Kiki's bow
pub const DEFAULT_FINDER_DARK: Color = Color::rgb(0xff, 0xc1, 0x07);
/// Cream behind the finder patterns
pub const DEFAULT_FINDER_LIGHT: Color = Color::rgb(0xfd, 0xf6, 0xe3);

/// Largest image side, in pixels, a style may produce
pub const MAX_IMAGE_SIDE: u32 = 32_768;

/// Modules across a version 1 symbol
const SMALLEST_SYMBOL: u32 = 21;

/// Which part of the symbol a module belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// One of the three 7x7 corner finder patterns
    Finder,
    /// Everything else inside the symbol
    Data,
    /// The border around the symbol
    QuietZone,
}

/// Styling applied when rasterizing a QR symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrStyle {
    /// Pixels per module, at least 1
    pub scale: u32,
    /// Quiet zone width in modules
    pub border: u32,
    /// Dark data modules
    pub dark: Color,
    /// Light data modules
    pub light: Color,
    /// Dark modules of the finder patterns
    pub finder_dark: Color,
    /// Light modules of the finder patterns
    pub finder_light: Color,
    /// Quiet zone color; `light` when unset
    pub quiet_zone: Option<Color>,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            border: DEFAULT_BORDER,
            dark: DEFAULT_DARK,
            light: DEFAULT_LIGHT,
            finder_dark: DEFAULT_FINDER_DARK,
            finder_light: DEFAULT_FINDER_LIGHT,
            quiet_zone: None,
        }
    }
}

impl QrStyle {
    /// Reject styles that cannot be rendered
    pub fn validate(&self) -> Result<()> {
        if self.scale == 0 {
            return Err(Error::InvalidStyle("scale must be at least 1".to_string()));
        }
        self.image_size(SMALLEST_SYMBOL).map(|_| ())
    }

    /// Color for a module of the given kind
    pub fn color_for(&self, kind: ModuleKind, dark: bool) -> Color {
        match (kind, dark) {
            (ModuleKind::Finder, true) => self.finder_dark,
            (ModuleKind::Finder, false) => self.finder_light,
            (ModuleKind::Data, true) => self.dark,
            (ModuleKind::Data, false) => self.light,
            (ModuleKind::QuietZone, _) => self.quiet_zone_color(),
        }
    }

    /// Effective quiet zone color
    pub fn quiet_zone_color(&self) -> Color {
        self.quiet_zone.unwrap_or(self.light)
    }

    /// Whether every color is fully opaque
    pub fn is_opaque(&self) -> bool {
        self.palette().iter().all(|(color, _)| color.is_opaque())
    }

    /// Every color in use, tagged with whether it paints a dark module
    pub fn palette(&self) -> [(Color, bool); 5] {
        [
            (self.dark, true),
            (self.finder_dark, true),
            (self.light, false),
            (self.finder_light, false),
            (self.quiet_zone_color(), false),
        ]
    }

    /// Side length in pixels of a symbol `modules` wide.
    ///
    /// Fails when the side would exceed [`MAX_IMAGE_SIDE`].
    pub fn image_size(&self, modules: u32) -> Result<u32> {
        self.border
            .checked_mul(2)
            .and_then(|quiet| quiet.checked_add(modules))
            .and_then(|side| side.checked_mul(self.scale))
            .filter(|side| *side <= MAX_IMAGE_SIDE)
            .ok_or_else(|| {
                Error::InvalidStyle(format!(
                    "{modules} modules with border {} at scale {} exceeds {MAX_IMAGE_SIDE} px",
                    self.border, self.scale
                ))
            })
    }
}
