//! Text annotation using embedded DejaVu fonts.

use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use once_cell::sync::Lazy;
use rusttype::{point, Font, Scale};
use sst_common::{SstError, SstResult};

use crate::colormap::Color;

const REGULAR_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
const BOLD_DATA: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// Regular and bold faces used for all figure annotation.
pub struct FontSet {
    pub regular: Font<'static>,
    pub bold: Font<'static>,
}

static FONTS: Lazy<Option<FontSet>> = Lazy::new(|| {
    Some(FontSet {
        regular: Font::try_from_bytes(REGULAR_DATA)?,
        bold: Font::try_from_bytes(BOLD_DATA)?,
    })
});

/// The embedded font set, parsed once per process.
pub fn fonts() -> SstResult<&'static FontSet> {
    FONTS
        .as_ref()
        .ok_or_else(|| SstError::Backend("embedded font data could not be parsed".to_string()))
}

fn to_rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

/// Draw text with its top-left corner at (x, y).
pub fn draw_text(
    img: &mut RgbaImage,
    font: &Font<'static>,
    text: &str,
    x: i32,
    y: i32,
    size: f32,
    color: Color,
) {
    draw_text_mut(img, to_rgba(color), x, y, Scale::uniform(size), font, text);
}

/// Advance width of a string at the given size, in pixels.
pub fn text_width(font: &Font<'static>, text: &str, size: f32) -> f32 {
    let scale = Scale::uniform(size);
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Line height (ascent to descent) at the given size.
pub fn line_height(font: &Font<'static>, size: f32) -> f32 {
    let vm = font.v_metrics(Scale::uniform(size));
    vm.ascent - vm.descent
}

/// Draw text rotated 90° counter-clockwise (reading bottom-to-top), with the
/// top-left corner of the rotated block at (x, y). Used for the colorbar
/// caption.
pub fn draw_text_vertical(
    img: &mut RgbaImage,
    font: &Font<'static>,
    text: &str,
    x: i32,
    y: i32,
    size: f32,
    color: Color,
) {
    let w = text_width(font, text, size).ceil().max(1.0) as u32;
    let h = line_height(font, size).ceil().max(1.0) as u32 + 2;
    let mut strip = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 0]));
    draw_text(&mut strip, font, text, 0, 0, size, color);
    let rotated = imageops::rotate270(&strip);
    imageops::overlay(img, &rotated, x as i64, y as i64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fonts_parse() {
        let f = fonts().unwrap();
        assert!(text_width(&f.regular, "35°N", 13.0) > 0.0);
        assert!(
            text_width(&f.bold, "Anomaly", 20.0) > text_width(&f.regular, "A", 20.0)
        );
    }

    #[test]
    fn test_draw_text_marks_pixels() {
        let f = fonts().unwrap();
        let mut img = RgbaImage::from_pixel(120, 40, Rgba([255, 255, 255, 255]));
        draw_text(&mut img, &f.regular, "0.5", 4, 4, 20.0, Color::rgb(0, 0, 0));
        let darkened = img.pixels().filter(|p| p.0[0] < 200).count();
        assert!(darkened > 0);
    }
}
