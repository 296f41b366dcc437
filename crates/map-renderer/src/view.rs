//! Fixed rendering configuration for the map figure.

use crate::colormap::Color;
use crate::projection::PixelRect;
use sst_common::GeoExtent;

/// Title text styling. The title is deliberately styled away from default
/// chart chrome (bold weight, non-black color).
#[derive(Debug, Clone)]
pub struct TitleStyle {
    pub color: Color,
    pub bold: bool,
    pub size: f32,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0x1a, 0x36, 0x5d),
            bold: true,
            size: 22.0,
        }
    }
}

/// Gridline styling: dashed, semi-transparent, labels on left/bottom only.
#[derive(Debug, Clone)]
pub struct GridlineStyle {
    pub color: Color,
    pub width: f32,
    /// On/off dash lengths in pixels
    pub dash: Vec<f32>,
    /// Degree interval between lines; None picks one from the extent span.
    pub interval: Option<f64>,
    pub label_size: f32,
}

impl Default for GridlineStyle {
    fn default() -> Self {
        Self {
            color: Color::new(128, 128, 128, 128),
            width: 1.0,
            dash: vec![6.0, 4.0],
            interval: None,
            label_size: 13.0,
        }
    }
}

/// Canvas margins reserved for labels, title and colorbar.
#[derive(Debug, Clone, Copy)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 72,
            right: 130,
            top: 56,
            bottom: 58,
        }
    }
}

/// The fixed rendering configuration: geographic extent, color scale,
/// labels, styling and canvas layout. Constant per render; never derived
/// from the data.
#[derive(Debug, Clone)]
pub struct MapViewSpec {
    pub extent: GeoExtent,
    /// Colormap name resolved through `Colormap::by_name`
    pub colormap: String,
    /// Colorbar caption, e.g. "sst_anomaly (°C)"
    pub colorbar_label: String,
    pub title: String,
    pub title_style: TitleStyle,
    pub gridlines: GridlineStyle,
    pub width: u32,
    pub height: u32,
    pub margins: Margins,
}

impl Default for MapViewSpec {
    fn default() -> Self {
        Self {
            // Korea / East China Sea coastal waters
            extent: GeoExtent::new(120.0, 136.0, 28.0, 42.0),
            colormap: "balance".to_string(),
            colorbar_label: "Sea-surface temperature anomaly (°C)".to_string(),
            title: "Sea-surface temperature anomaly".to_string(),
            title_style: TitleStyle::default(),
            gridlines: GridlineStyle::default(),
            width: 900,
            height: 700,
            margins: Margins::default(),
        }
    }
}

impl MapViewSpec {
    /// The map axes rectangle (data, land, gridlines are clipped to this).
    pub fn map_rect(&self) -> PixelRect {
        PixelRect::new(
            self.margins.left,
            self.margins.top,
            self.width - self.margins.left - self.margins.right,
            self.height - self.margins.top - self.margins.bottom,
        )
    }

    /// The colorbar bar rectangle, right of the map axes.
    pub fn colorbar_rect(&self) -> PixelRect {
        let map = self.map_rect();
        PixelRect::new(map.right() + 24, map.y, 18, map.h)
    }
}
