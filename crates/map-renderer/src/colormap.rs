//! Color scales for anomaly rendering.
//!
//! The default scale is a diverging blue-white-red ramp: negative anomalies
//! map to cool colors, positive to warm, with white at zero. Normalization is
//! always symmetric about zero so the visual center never drifts with the
//! data range.

use sst_common::GriddedField;

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Linear color interpolation
fn lerp(c1: Color, c2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;
    Color::new(
        ((c1.r as f32 * t_inv) + (c2.r as f32 * t)) as u8,
        ((c1.g as f32 * t_inv) + (c2.g as f32 * t)) as u8,
        ((c1.b as f32 * t_inv) + (c2.b as f32 * t)) as u8,
        ((c1.a as f32 * t_inv) + (c2.a as f32 * t)) as u8,
    )
}

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// A color stop at a normalized position in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

/// A continuous color scale built from ordered stops.
#[derive(Debug, Clone)]
pub struct Colormap {
    pub name: &'static str,
    stops: Vec<ColorStop>,
}

impl Colormap {
    /// Look up a colormap by name. "balance" is the diverging anomaly scale;
    /// "thermal" is a sequential scale for absolute temperatures.
    pub fn by_name(name: &str) -> Option<Colormap> {
        match name {
            "balance" => Some(Self::from_hex(
                "balance",
                &[
                    (0.0, "#313695"),
                    (0.125, "#4575b4"),
                    (0.25, "#74add1"),
                    (0.375, "#abd9e9"),
                    (0.46, "#e0f3f8"),
                    (0.5, "#ffffff"),
                    (0.54, "#fee090"),
                    (0.625, "#fdae61"),
                    (0.75, "#f46d43"),
                    (0.875, "#d73027"),
                    (1.0, "#a50026"),
                ],
            )),
            "thermal" => Some(Self::from_hex(
                "thermal",
                &[
                    (0.0, "#042333"),
                    (0.2, "#24527a"),
                    (0.4, "#6a6ea6"),
                    (0.6, "#c26e7c"),
                    (0.8, "#eb9c5c"),
                    (1.0, "#f9fb67"),
                ],
            )),
            _ => None,
        }
    }

    fn from_hex(name: &'static str, stops: &[(f32, &str)]) -> Colormap {
        let stops = stops
            .iter()
            .map(|&(t, hex)| {
                // Stops are compile-time constants; a bad literal is a programming error.
                let (r, g, b) = hex_to_rgb(hex).unwrap_or((200, 200, 200));
                ColorStop {
                    t,
                    color: Color::rgb(r, g, b),
                }
            })
            .collect();
        Colormap { name, stops }
    }

    /// Sample the scale at a normalized position, clamping to [0, 1].
    pub fn sample(&self, t: f32) -> Color {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
        let stops = &self.stops;
        if t <= stops[0].t {
            return stops[0].color;
        }
        for w in stops.windows(2) {
            if t <= w[1].t {
                let span = w[1].t - w[0].t;
                let local = if span <= f32::EPSILON {
                    0.0
                } else {
                    (t - w[0].t) / span
                };
                return lerp(w[0].color, w[1].color, local);
            }
        }
        stops[stops.len() - 1].color
    }
}

/// Value range the color scale is normalized over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub vmin: f32,
    pub vmax: f32,
}

/// Half-width used when the data range degenerates (e.g. an all-zero field),
/// so the colorbar still spans a non-empty interval.
const DEGENERATE_HALF_SPAN: f32 = 0.5;

impl ValueRange {
    /// Symmetric-about-zero range covering the field's finite values.
    /// NaN cells never contribute. An all-NaN or constant-zero field yields
    /// the degenerate epsilon range.
    pub fn symmetric(field: &GriddedField) -> ValueRange {
        let half = match field.finite_range() {
            Some((lo, hi)) => lo.abs().max(hi.abs()),
            None => 0.0,
        };
        let half = if half <= f32::EPSILON {
            DEGENERATE_HALF_SPAN
        } else {
            half
        };
        ValueRange {
            vmin: -half,
            vmax: half,
        }
    }

    pub fn span(&self) -> f32 {
        self.vmax - self.vmin
    }

    /// Map a value into [0, 1] over this range.
    pub fn normalize(&self, v: f32) -> f32 {
        ((v - self.vmin) / self.span()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FF0000"), Some((255, 0, 0)));
        assert_eq!(hex_to_rgb("313695"), Some((49, 54, 149)));
        assert_eq!(hex_to_rgb("#GGGGGG"), None);
        assert_eq!(hex_to_rgb("#FFF"), None);
    }

    #[test]
    fn test_by_name() {
        assert!(Colormap::by_name("balance").is_some());
        assert!(Colormap::by_name("thermal").is_some());
        assert!(Colormap::by_name("viridis").is_none());
    }

    #[test]
    fn test_sample_endpoints_and_center() {
        let cm = Colormap::by_name("balance").unwrap();
        assert_eq!(cm.sample(0.0), Color::rgb(0x31, 0x36, 0x95));
        assert_eq!(cm.sample(1.0), Color::rgb(0xa5, 0x00, 0x26));
        assert_eq!(cm.sample(0.5), Color::rgb(255, 255, 255));
        // Clamping
        assert_eq!(cm.sample(-3.0), cm.sample(0.0));
        assert_eq!(cm.sample(7.0), cm.sample(1.0));
    }

    #[test]
    fn test_symmetric_range() {
        let field = GriddedField::new(
            "a",
            "°C",
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![-2.0, 0.5, 1.0, f32::NAN],
        )
        .unwrap();
        let r = ValueRange::symmetric(&field);
        assert_eq!(r.vmin, -2.0);
        assert_eq!(r.vmax, 2.0);
        assert_eq!(r.normalize(0.0), 0.5);
        assert_eq!(r.normalize(2.0), 1.0);
    }

    #[test]
    fn test_degenerate_range_expands() {
        let field = GriddedField::new(
            "a",
            "°C",
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0; 4],
        )
        .unwrap();
        let r = ValueRange::symmetric(&field);
        assert!(r.span() > 0.0);
        assert_eq!(r.normalize(0.0), 0.5);
    }
}
