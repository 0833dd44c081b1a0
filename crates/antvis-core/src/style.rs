//! Visual configuration for buttons.
//!
//! Every constant the widgets paint with lives in [`ButtonStyle`], which can be
//! loaded from JSON. Missing fields fall back to the built-in look.

use std::path::Path;

use kurbo::Vec2;
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl RgbaColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Convert to a peniko color.
    pub fn color(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl From<Color> for RgbaColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<RgbaColor> for Color {
    fn from(color: RgbaColor) -> Self {
        color.color()
    }
}

/// Font description handed to the surface for measuring and drawing labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    /// Family name (or CSS-like fallback list, left to the surface to interpret).
    pub family: String,
    /// Size in pixels.
    pub size: f64,
    pub bold: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Arial".to_string(),
            size: 20.0,
            bold: true,
        }
    }
}

/// Style properties for every button drawn by the manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonStyle {
    /// Tile painted behind every button.
    pub background: RgbaColor,
    /// Fill of the rounded highlight while hovered or pressed.
    pub highlight: RgbaColor,
    /// Outline stroked around a hovered or pressed button.
    pub outline: RgbaColor,
    pub outline_width: f64,
    /// Drop shadow under clickable buttons.
    pub shadow_color: RgbaColor,
    pub shadow_blur: f64,
    pub shadow_offset: Vec2,
    /// Shadow blur while pressed (no offset, so the button looks pushed in).
    pub pressed_shadow_blur: f64,
    /// Vertical shift of the face: down while pressed, up otherwise.
    pub press_shift: f64,
    /// Corner radius as a fraction of the shorter button side.
    pub corner_ratio: f64,
    /// Inset of the highlight shape from the button edges.
    pub highlight_margin: f64,
    /// Label font of text buttons.
    pub font: FontSpec,
    /// Horizontal padding added to the measured label width.
    pub text_padding: f64,
    /// Fixed height of text buttons.
    pub text_height: f64,
    /// Label origin inside the button (left edge, bottom baseline).
    pub text_inset: f64,
    pub text_baseline: f64,
    /// Shadow color behind labels, acting as a legibility halo.
    pub text_halo: RgbaColor,
    /// Gap between cascaded text buttons, both horizontally and vertically.
    pub gutter: f64,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            background: RgbaColor::white(),
            highlight: RgbaColor::new(255, 230, 200, 255),
            outline: RgbaColor::black(),
            outline_width: 2.0,
            shadow_color: RgbaColor::new(0, 0, 0, 179),
            shadow_blur: 4.0,
            shadow_offset: Vec2::new(-2.0, 2.0),
            pressed_shadow_blur: 1.0,
            press_shift: 1.0,
            corner_ratio: 0.2,
            highlight_margin: 1.0,
            font: FontSpec::default(),
            text_padding: 8.0,
            text_height: 28.0,
            text_inset: 4.0,
            text_baseline: 25.0,
            text_halo: RgbaColor::white(),
            gutter: 2.0,
        }
    }
}

impl ButtonStyle {
    /// Parse a style from JSON. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a style from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let style = Self::from_json(&json)?;
        log::debug!("Loaded button style from {:?}", path.as_ref());
        Ok(style)
    }

    /// Serialize the style to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
