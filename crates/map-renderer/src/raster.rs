//! Data layer: grid cells to colored pixels.
//!
//! Each canvas pixel inside the map axes maps back to lon/lat and takes the
//! color of the grid cell covering that point, so every visible cell renders
//! as a filled quadrilateral with no resampling. Cell edges sit at midpoints
//! between axis points, extrapolated by half a spacing at the ends.

use image::{Rgba, RgbaImage};
use sst_common::GriddedField;

use crate::colormap::{Colormap, ValueRange};
use crate::projection::PlateCarree;

/// Cell edge positions for one axis: `axis.len() + 1` monotonic values.
fn cell_edges(axis: &[f64]) -> Vec<f64> {
    let n = axis.len();
    let mut edges = Vec::with_capacity(n + 1);
    edges.push(axis[0] - (axis[1] - axis[0]) / 2.0);
    for w in axis.windows(2) {
        edges.push((w[0] + w[1]) / 2.0);
    }
    edges.push(axis[n - 1] + (axis[n - 1] - axis[n - 2]) / 2.0);
    edges
}

/// Index of the cell whose edge interval contains `x`, if any.
fn locate(edges: &[f64], x: f64) -> Option<usize> {
    if x < edges[0] || x > edges[edges.len() - 1] {
        return None;
    }
    let idx = edges.partition_point(|e| *e <= x);
    Some(idx.saturating_sub(1).min(edges.len() - 2))
}

/// Paint the field onto the figure through the color scale. NaN cells and
/// pixels outside the data coverage are left untouched (background shows
/// through as the missing-data gap).
pub fn draw_field(
    img: &mut RgbaImage,
    proj: &PlateCarree,
    field: &GriddedField,
    colormap: &Colormap,
    range: &ValueRange,
) {
    let rect = proj.rect();
    let lon_edges = cell_edges(&field.lons);
    let lat_edges = cell_edges(&field.lats);

    for py in rect.y..rect.bottom() {
        for px in rect.x..rect.right() {
            let (lon, lat) = proj.to_geo(px as f64 + 0.5, py as f64 + 0.5);
            let (Some(col), Some(row)) = (locate(&lon_edges, lon), locate(&lat_edges, lat))
            else {
                continue;
            };
            let Some(v) = field.value_at(row, col) else {
                continue;
            };
            if !v.is_finite() {
                continue;
            }
            let c = colormap.sample(range.normalize(v));
            img.put_pixel(px, py, Rgba([c.r, c.g, c.b, c.a]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::PixelRect;
    use sst_common::GeoExtent;

    #[test]
    fn test_cell_edges_midpoints() {
        let edges = cell_edges(&[120.0, 120.25, 120.5]);
        assert_eq!(edges, vec![119.875, 120.125, 120.375, 120.625]);
    }

    #[test]
    fn test_locate() {
        let edges = cell_edges(&[120.0, 120.25, 120.5]);
        assert_eq!(locate(&edges, 120.0), Some(0));
        assert_eq!(locate(&edges, 120.2), Some(1));
        assert_eq!(locate(&edges, 120.6), Some(2));
        assert_eq!(locate(&edges, 119.0), None);
        assert_eq!(locate(&edges, 121.0), None);
    }

    #[test]
    fn test_draw_field_colors_cells_and_skips_nan() {
        let field = GriddedField::new(
            "a",
            "°C",
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0, f32::NAN, 1.0],
        )
        .unwrap();
        let proj = PlateCarree::new(GeoExtent::new(-0.5, 1.5, -0.5, 1.5), PixelRect::new(0, 0, 40, 40));
        let colormap = Colormap::by_name("balance").unwrap();
        let range = ValueRange { vmin: -1.0, vmax: 1.0 };

        let bg = Rgba([9u8, 9, 9, 255]);
        let mut img = RgbaImage::from_pixel(40, 40, bg);
        draw_field(&mut img, &proj, &field, &colormap, &range);

        // NaN cell is row 1 (lat=1.0, upper half), col 0 (lon=0.0, left half)
        let (nx, ny) = proj.to_pixel(0.0, 1.0);
        let (fx, fy) = proj.to_pixel(1.0, 1.0);
        assert_eq!(*img.get_pixel(nx as u32, ny as u32), bg);
        assert_ne!(*img.get_pixel(fx as u32, fy as u32), bg);
    }
}
