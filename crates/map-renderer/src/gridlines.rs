//! Gridlines and edge labels.
//!
//! Lines are dashed and semi-transparent; degree labels are drawn on the
//! left (latitude) and bottom (longitude) edges only, so the top and right
//! stay free of redundant axis text.

use image::RgbaImage;
use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

use crate::projection::PlateCarree;
use crate::text::{self, FontSet};
use crate::view::GridlineStyle;

/// Pick a grid interval giving a readable number of lines over the span.
pub fn nice_interval(span_degrees: f64) -> f64 {
    const CANDIDATES: [f64; 10] = [0.25, 0.5, 1.0, 2.0, 2.5, 5.0, 10.0, 15.0, 20.0, 30.0];
    for c in CANDIDATES {
        if span_degrees / c <= 8.0 {
            return c;
        }
    }
    45.0
}

/// Multiples of `interval` within [min, max].
pub fn line_positions(min: f64, max: f64, interval: f64) -> Vec<f64> {
    let mut positions = Vec::new();
    let mut v = (min / interval).ceil() * interval;
    while v <= max + 1e-9 {
        positions.push(v);
        v += interval;
    }
    positions
}

fn format_degrees(value: f64, interval: f64, positive: char, negative: char) -> String {
    let suffix = if value < 0.0 { negative } else { positive };
    let magnitude = value.abs();
    if interval.fract() == 0.0 {
        format!("{:.0}°{}", magnitude, suffix)
    } else {
        format!("{:.2}°{}", magnitude, suffix)
    }
}

pub fn format_lon(lon: f64, interval: f64) -> String {
    format_degrees(lon, interval, 'E', 'W')
}

pub fn format_lat(lat: f64, interval: f64) -> String {
    format_degrees(lat, interval, 'N', 'S')
}

fn resolved_interval(proj: &PlateCarree, style: &GridlineStyle) -> f64 {
    style
        .interval
        .unwrap_or_else(|| nice_interval(proj.extent().width().max(proj.extent().height())))
}

/// Draw the dashed lines into the overlay pixmap (clipped to the map rect at
/// composite time).
pub fn draw_lines(pixmap: &mut Pixmap, proj: &PlateCarree, style: &GridlineStyle) {
    let interval = resolved_interval(proj, style);
    let extent = proj.extent();
    let rect = proj.rect();

    let mut paint = Paint::default();
    paint.set_color_rgba8(style.color.r, style.color.g, style.color.b, style.color.a);
    paint.anti_alias = false;

    let stroke = Stroke {
        width: style.width,
        dash: StrokeDash::new(style.dash.clone(), 0.0),
        ..Stroke::default()
    };

    let mut pb = PathBuilder::new();
    for lon in line_positions(extent.lon_min, extent.lon_max, interval) {
        let (x, _) = proj.to_pixel(lon, extent.lat_max);
        pb.move_to(x, rect.y as f32);
        pb.line_to(x, rect.bottom() as f32);
    }
    for lat in line_positions(extent.lat_min, extent.lat_max, interval) {
        let (_, y) = proj.to_pixel(extent.lon_min, lat);
        pb.move_to(rect.x as f32, y);
        pb.line_to(rect.right() as f32, y);
    }
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

/// Draw latitude labels left of the map and longitude labels below it.
pub fn draw_edge_labels(
    img: &mut RgbaImage,
    proj: &PlateCarree,
    fonts: &FontSet,
    style: &GridlineStyle,
) {
    let interval = resolved_interval(proj, style);
    let extent = proj.extent();
    let rect = proj.rect();
    let size = style.label_size;
    let color = crate::colormap::Color::rgb(60, 60, 60);
    let line_h = text::line_height(&fonts.regular, size);

    for lat in line_positions(extent.lat_min, extent.lat_max, interval) {
        let (_, y) = proj.to_pixel(extent.lon_min, lat);
        let label = format_lat(lat, interval);
        let w = text::text_width(&fonts.regular, &label, size);
        text::draw_text(
            img,
            &fonts.regular,
            &label,
            rect.x as i32 - w.ceil() as i32 - 8,
            (y - line_h / 2.0) as i32,
            size,
            color,
        );
    }

    for lon in line_positions(extent.lon_min, extent.lon_max, interval) {
        let (x, _) = proj.to_pixel(lon, extent.lat_min);
        let label = format_lon(lon, interval);
        let w = text::text_width(&fonts.regular, &label, size);
        text::draw_text(
            img,
            &fonts.regular,
            &label,
            (x - w / 2.0) as i32,
            rect.bottom() as i32 + 8,
            size,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_interval() {
        assert_eq!(nice_interval(1.5), 0.25);
        assert_eq!(nice_interval(16.0), 2.0);
        assert_eq!(nice_interval(120.0), 15.0);
    }

    #[test]
    fn test_line_positions() {
        assert_eq!(line_positions(120.0, 136.0, 5.0), vec![120.0, 125.0, 130.0, 135.0]);
        assert_eq!(line_positions(28.0, 42.0, 5.0), vec![30.0, 35.0, 40.0]);
        assert!(line_positions(0.4, 0.6, 1.0).is_empty());
    }

    #[test]
    fn test_degree_formatting() {
        assert_eq!(format_lon(125.0, 5.0), "125°E");
        assert_eq!(format_lon(-70.0, 5.0), "70°W");
        assert_eq!(format_lat(35.0, 5.0), "35°N");
        assert_eq!(format_lat(-12.5, 2.5), "12.50°S");
    }
}
