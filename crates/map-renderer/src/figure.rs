//! The rendered figure: canvas assembly and export.

use image::{Rgba, RgbaImage};
use sst_common::{SstError, SstResult};
use tiny_skia::Pixmap;

use crate::colormap::{Color, ValueRange};
use crate::png;
use crate::projection::PixelRect;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A self-contained rendered map figure.
///
/// Owns its pixel buffer; the renderer keeps no reference after returning
/// it. `to_png` is deterministic for identical figures.
#[derive(Debug)]
pub struct MapFigure {
    img: RgbaImage,
    map_rect: PixelRect,
    value_range: ValueRange,
}

impl MapFigure {
    pub(crate) fn new(width: u32, height: u32, map_rect: PixelRect, value_range: ValueRange) -> SstResult<Self> {
        if width == 0 || height == 0 || map_rect.right() > width || map_rect.bottom() > height {
            return Err(SstError::Render(format!(
                "map rect {:?} does not fit a {}x{} canvas",
                map_rect, width, height
            )));
        }
        Ok(Self {
            img: RgbaImage::from_pixel(width, height, BACKGROUND),
            map_rect,
            value_range,
        })
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    /// The map axes rectangle within the canvas.
    pub fn map_rect(&self) -> PixelRect {
        self.map_rect
    }

    /// The value range the color scale was normalized over.
    pub fn value_range(&self) -> ValueRange {
        self.value_range
    }

    /// Raw RGBA pixels, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.img.as_raw()
    }

    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.img
    }

    /// Composite a vector overlay onto the canvas, restricted to the map
    /// axes rectangle so overlay geometry never bleeds into the margins.
    pub(crate) fn composite_overlay(&mut self, overlay: &Pixmap) {
        let rect = self.map_rect;
        for py in rect.y..rect.bottom().min(overlay.height()) {
            for px in rect.x..rect.right().min(overlay.width()) {
                let Some(src) = overlay.pixel(px, py) else {
                    continue;
                };
                if src.alpha() == 0 {
                    continue;
                }
                let s = src.demultiply();
                let sa = s.alpha() as u32;
                let dst = self.img.get_pixel_mut(px, py);
                // Source-over with an opaque destination
                for (d, sc) in dst.0.iter_mut().take(3).zip([s.red(), s.green(), s.blue()]) {
                    *d = ((sc as u32 * sa + *d as u32 * (255 - sa)) / 255) as u8;
                }
            }
        }
    }

    /// Draw the axes frame around the map rectangle.
    pub(crate) fn draw_frame(&mut self, color: Color) {
        let rect = self.map_rect;
        let px_color = Rgba([color.r, color.g, color.b, 255]);
        for px in rect.x..rect.right() {
            self.img.put_pixel(px, rect.y, px_color);
            self.img.put_pixel(px, rect.bottom() - 1, px_color);
        }
        for py in rect.y..rect.bottom() {
            self.img.put_pixel(rect.x, py, px_color);
            self.img.put_pixel(rect.right() - 1, py, px_color);
        }
    }

    /// Encode the figure as a PNG.
    pub fn to_png(&self) -> SstResult<Vec<u8>> {
        png::create_png(
            self.img.as_raw(),
            self.img.width() as usize,
            self.img.height() as usize,
        )
        .map_err(SstError::Render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_oversized_map_rect() {
        let err = MapFigure::new(
            100,
            100,
            PixelRect::new(50, 50, 100, 100),
            ValueRange { vmin: -1.0, vmax: 1.0 },
        )
        .unwrap_err();
        assert!(matches!(err, SstError::Render(_)));
    }

    #[test]
    fn test_composite_clips_to_map_rect() {
        let mut fig = MapFigure::new(
            100,
            100,
            PixelRect::new(20, 20, 40, 40),
            ValueRange { vmin: -1.0, vmax: 1.0 },
        )
        .unwrap();
        let mut overlay = Pixmap::new(100, 100).unwrap();
        overlay.fill(tiny_skia::Color::from_rgba8(255, 0, 0, 255));
        fig.composite_overlay(&overlay);

        // Inside the map rect: red; in the margin: background
        assert_eq!(fig.img.get_pixel(30, 30).0, [255, 0, 0, 255]);
        assert_eq!(fig.img.get_pixel(5, 5).0, [255, 255, 255, 255]);
    }
}
