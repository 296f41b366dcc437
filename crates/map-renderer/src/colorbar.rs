//! Vertical colorbar tied to the data layer's color mapping.

use image::{Rgba, RgbaImage};

use crate::colormap::{Color, Colormap, ValueRange};
use crate::projection::PixelRect;
use crate::text::{self, FontSet};

const TICK_COUNT: usize = 5;
const TICK_LEN: i32 = 4;
const LABEL_SIZE: f32 = 12.0;
const CAPTION_SIZE: f32 = 14.0;

fn format_tick(value: f32, span: f32) -> String {
    if span >= 10.0 {
        format!("{:.0}", value)
    } else if span >= 1.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Draw the colorbar: gradient bar, border, ticks with value labels, and a
/// vertical caption. The bar samples the exact colormap and range used for
/// the data layer, independent of any other decoration.
pub fn draw_colorbar(
    img: &mut RgbaImage,
    bar: PixelRect,
    colormap: &Colormap,
    range: &ValueRange,
    caption: &str,
    fonts: &FontSet,
) {
    // Gradient fill, vmax at the top
    for row in 0..bar.h {
        let t = 1.0 - row as f32 / (bar.h - 1).max(1) as f32;
        let c = colormap.sample(t);
        for col in 0..bar.w {
            img.put_pixel(bar.x + col, bar.y + row, Rgba([c.r, c.g, c.b, 255]));
        }
    }

    // Border
    let border = Rgba([0u8, 0, 0, 255]);
    for px in bar.x..bar.right() {
        img.put_pixel(px, bar.y, border);
        img.put_pixel(px, bar.bottom() - 1, border);
    }
    for py in bar.y..bar.bottom() {
        img.put_pixel(bar.x, py, border);
        img.put_pixel(bar.right() - 1, py, border);
    }

    // Ticks and labels on the right side of the bar
    let label_color = Color::rgb(40, 40, 40);
    let line_h = text::line_height(&fonts.regular, LABEL_SIZE);
    let mut max_label_w = 0.0f32;
    for i in 0..TICK_COUNT {
        let frac = i as f32 / (TICK_COUNT - 1) as f32;
        let value = range.vmin + frac * range.span();
        let y = bar.bottom() as f32 - 1.0 - frac * (bar.h - 1) as f32;
        for dx in 0..TICK_LEN {
            let px = bar.right() as i32 + dx;
            if px >= 0 && (px as u32) < img.width() {
                img.put_pixel(px as u32, y as u32, border);
            }
        }
        let label = format_tick(value, range.span());
        max_label_w = max_label_w.max(text::text_width(&fonts.regular, &label, LABEL_SIZE));
        text::draw_text(
            img,
            &fonts.regular,
            &label,
            bar.right() as i32 + TICK_LEN + 4,
            (y - line_h / 2.0) as i32,
            LABEL_SIZE,
            label_color,
        );
    }

    // Vertical caption, reading bottom-to-top, centered on the bar
    let caption_h = text::text_width(&fonts.regular, caption, CAPTION_SIZE);
    let cx = bar.right() as i32 + TICK_LEN + 8 + max_label_w.ceil() as i32;
    let cy = bar.y as i32 + ((bar.h as f32 - caption_h) / 2.0) as i32;
    text::draw_text_vertical(
        img,
        &fonts.regular,
        caption,
        cx,
        cy.max(bar.y as i32),
        CAPTION_SIZE,
        label_color,
    );
}
