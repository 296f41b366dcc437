//! Land and coastline geometry.
//!
//! Geometry is an embedded, simplified (1:110m-class) land polygon set
//! covering East Asian coastal waters. The land fill is drawn above the data
//! layer and below the coastline strokes, so ocean cells stay visible and
//! land is uniformly masked.

use once_cell::sync::Lazy;
use serde::Deserialize;
use sst_common::{SstError, SstResult};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::colormap::Color;
use crate::projection::PlateCarree;

const LAND_GEOJSON: &str = include_str!("../assets/land_110m.geojson");

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<[f64; 2]>>> },
}

/// Land polygons as lon/lat outer rings.
#[derive(Debug)]
pub struct LandFeatures {
    pub rings: Vec<Vec<(f64, f64)>>,
}

impl LandFeatures {
    fn parse(geojson: &str) -> Result<Self, String> {
        let fc: FeatureCollection =
            serde_json::from_str(geojson).map_err(|e| format!("invalid land GeoJSON: {}", e))?;
        let mut rings = Vec::new();
        for feature in fc.features {
            match feature.geometry {
                Geometry::Polygon { coordinates } => {
                    if let Some(outer) = coordinates.into_iter().next() {
                        rings.push(outer.into_iter().map(|c| (c[0], c[1])).collect());
                    }
                }
                Geometry::MultiPolygon { coordinates } => {
                    for polygon in coordinates {
                        if let Some(outer) = polygon.into_iter().next() {
                            rings.push(outer.into_iter().map(|c| (c[0], c[1])).collect());
                        }
                    }
                }
            }
        }
        if rings.is_empty() {
            return Err("land GeoJSON contains no polygons".to_string());
        }
        Ok(Self { rings })
    }
}

static LAND: Lazy<Result<LandFeatures, String>> = Lazy::new(|| LandFeatures::parse(LAND_GEOJSON));

/// The embedded land polygon set, parsed once per process.
pub fn embedded() -> SstResult<&'static LandFeatures> {
    LAND.as_ref().map_err(|e| SstError::Backend(e.clone()))
}

/// Land fill color (matches the usual lightgray land facecolor).
pub const LAND_FILL: Color = Color {
    r: 211,
    g: 211,
    b: 211,
    a: 255,
};

/// Coastline stroke color.
pub const COAST_STROKE: Color = Color {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
};

fn ring_path(ring: &[(f64, f64)], proj: &PlateCarree) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    let mut points = ring.iter();
    let (lon, lat) = points.next()?;
    let (x, y) = proj.to_pixel(*lon, *lat);
    pb.move_to(x, y);
    for (lon, lat) in points {
        let (x, y) = proj.to_pixel(*lon, *lat);
        pb.line_to(x, y);
    }
    pb.close();
    pb.finish()
}

/// Draw the filled land mask and coastline outlines into the overlay pixmap.
/// Fill first, strokes on top, so the coastline stays crisp over the mask.
pub fn draw_land(pixmap: &mut Pixmap, proj: &PlateCarree, land: &LandFeatures) {
    let mut fill_paint = Paint::default();
    fill_paint.set_color_rgba8(LAND_FILL.r, LAND_FILL.g, LAND_FILL.b, LAND_FILL.a);
    fill_paint.anti_alias = true;

    let mut stroke_paint = Paint::default();
    stroke_paint.set_color_rgba8(
        COAST_STROKE.r,
        COAST_STROKE.g,
        COAST_STROKE.b,
        COAST_STROKE.a,
    );
    stroke_paint.anti_alias = true;

    let stroke = Stroke {
        width: 1.2,
        ..Stroke::default()
    };

    for ring in &land.rings {
        if let Some(path) = ring_path(ring, proj) {
            pixmap.fill_path(
                &path,
                &fill_paint,
                FillRule::Winding,
                Transform::identity(),
                None,
            );
            pixmap.stroke_path(&path, &stroke_paint, &stroke, Transform::identity(), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::PixelRect;
    use sst_common::GeoExtent;

    #[test]
    fn test_embedded_geometry_parses() {
        let land = embedded().unwrap();
        assert!(!land.rings.is_empty());
        // Every ring is a usable polygon
        for ring in &land.rings {
            assert!(ring.len() >= 4);
        }
    }

    #[test]
    fn test_parse_rejects_empty() {
        let err = LandFeatures::parse(r#"{"features": []}"#).unwrap_err();
        assert!(err.contains("no polygons"));
    }

    #[test]
    fn test_draw_land_covers_korea() {
        let land = embedded().unwrap();
        let proj = PlateCarree::new(
            GeoExtent::new(120.0, 136.0, 28.0, 42.0),
            PixelRect::new(0, 0, 320, 280),
        );
        let mut pixmap = Pixmap::new(320, 280).unwrap();
        draw_land(&mut pixmap, &proj, land);

        // Inland Korea (~127.5E, 36.5N) must be masked, open water must not.
        let (kx, ky) = proj.to_pixel(127.5, 36.5);
        let (wx, wy) = proj.to_pixel(133.0, 30.5);
        let at = |x: f32, y: f32| pixmap.pixel(x as u32, y as u32).unwrap();
        assert!(at(kx, ky).alpha() > 0);
        assert_eq!(at(wx, wy).alpha(), 0);
    }
}
