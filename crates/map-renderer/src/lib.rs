//! Map-figure construction for gridded sea-surface temperature anomalies.
//!
//! The entry point is [`render_map`]: a pure function turning a
//! [`GriddedField`] plus a [`MapViewSpec`] into a self-contained
//! [`MapFigure`] (data layer, land mask, coastlines, gridlines, colorbar,
//! styled title) on an equirectangular canvas. All map assets (land
//! geometry, fonts) are compiled in; the renderer performs no I/O and keeps
//! no state between calls.

pub mod colorbar;
pub mod colormap;
pub mod features;
pub mod figure;
pub mod gridlines;
pub mod png;
pub mod projection;
pub mod raster;
pub mod text;
pub mod view;

pub use colormap::{Color, Colormap, ValueRange};
pub use figure::MapFigure;
pub use projection::{PixelRect, PlateCarree};
pub use view::{GridlineStyle, MapViewSpec, Margins, TitleStyle};

use sst_common::{GriddedField, SstError, SstResult};
use tiny_skia::Pixmap;

/// Render a gridded scalar field as an annotated map figure.
///
/// Layer order, bottom to top: background, data layer, land mask,
/// coastlines, gridlines, axes frame; labels, colorbar and title live in
/// the canvas margins. Identical inputs produce byte-identical PNG output.
///
/// # Errors
/// - [`SstError::ShapeMismatch`] / [`SstError::NonMonotonicAxis`] when the
///   field violates its grid invariants.
/// - [`SstError::InvalidExtent`] when the extent is degenerate or does not
///   overlap the data coverage. A non-overlapping viewport fails loudly
///   instead of producing a silently blank map.
/// - [`SstError::Backend`] when embedded assets are unusable.
pub fn render_map(field: &GriddedField, spec: &MapViewSpec) -> SstResult<MapFigure> {
    field.check_invariants()?;
    spec.extent.validate()?;

    let coverage = field.bounding_extent();
    if !spec.extent.intersects(&coverage) {
        return Err(SstError::InvalidExtent(format!(
            "viewport {} does not overlap data coverage {}",
            spec.extent, coverage
        )));
    }

    let colormap = Colormap::by_name(&spec.colormap)
        .ok_or_else(|| SstError::Render(format!("unknown colormap '{}'", spec.colormap)))?;
    let fonts = text::fonts()?;
    let land = features::embedded()?;

    let range = ValueRange::symmetric(field);
    let map_rect = spec.map_rect();
    let proj = PlateCarree::new(spec.extent, map_rect);

    tracing::debug!(
        field = %field.name,
        extent = %spec.extent,
        vmin = range.vmin,
        vmax = range.vmax,
        "rendering map figure"
    );

    let mut fig = figure::MapFigure::new(spec.width, spec.height, map_rect, range)?;

    // Data layer
    raster::draw_field(fig.image_mut(), &proj, field, &colormap, &range);

    // Vector overlay: land fill, coastlines, gridlines; clipped to the map
    // rect when composited
    let mut overlay = Pixmap::new(spec.width, spec.height)
        .ok_or_else(|| SstError::Render("overlay allocation failed".to_string()))?;
    features::draw_land(&mut overlay, &proj, land);
    gridlines::draw_lines(&mut overlay, &proj, &spec.gridlines);
    fig.composite_overlay(&overlay);
    fig.draw_frame(Color::rgb(0, 0, 0));

    // Margin annotations
    gridlines::draw_edge_labels(fig.image_mut(), &proj, fonts, &spec.gridlines);
    colorbar::draw_colorbar(
        fig.image_mut(),
        spec.colorbar_rect(),
        &colormap,
        &range,
        &spec.colorbar_label,
        fonts,
    );
    draw_title(&mut fig, spec, fonts);

    Ok(fig)
}

fn draw_title(fig: &mut MapFigure, spec: &MapViewSpec, fonts: &text::FontSet) {
    let style = &spec.title_style;
    let font = if style.bold { &fonts.bold } else { &fonts.regular };
    let w = text::text_width(font, &spec.title, style.size);
    let map = spec.map_rect();
    let x = map.x as i32 + ((map.w as f32 - w) / 2.0) as i32;
    let y = (map.y as f32 - text::line_height(font, style.size) - 10.0).max(0.0) as i32;
    text::draw_text(fig.image_mut(), font, &spec.title, x, y, style.size, style.color);
}
