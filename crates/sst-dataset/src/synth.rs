//! Deterministic synthetic anomaly fields.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sst_common::{GriddedField, SstResult};

/// Default region: Korea / East China Sea coastal waters at 0.25° spacing,
/// 64 longitudes x 56 latitudes (120–135.75°E, 28–41.75°N).
pub fn default_region_axes() -> (Vec<f64>, Vec<f64>) {
    let lons = (0..64).map(|i| 120.0 + 0.25 * i as f64).collect();
    let lats = (0..56).map(|i| 28.0 + 0.25 * i as f64).collect();
    (lons, lats)
}

/// Rough western land boundary: cells west of the mainland coast are
/// missing, like the masked land cells in a real sea-surface product.
fn is_land_cell(lon: f64, lat: f64) -> bool {
    lon < 121.0 + (lat - 28.0) * 0.14
}

/// Synthesize a seeded anomaly field over the default region.
///
/// The field is a smooth large-scale pattern (a warm tongue in the
/// southeast, cooling toward the northwest) plus seeded noise. The same
/// seed always yields bitwise-identical values.
pub fn synthesize(name: &str, seed: u64) -> SstResult<GriddedField> {
    let (lons, lats) = default_region_axes();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut values = Vec::with_capacity(lons.len() * lats.len());

    for &lat in &lats {
        for &lon in &lons {
            // Keep the rng stream aligned across land and ocean cells
            let noise = (rng.gen::<f32>() - 0.5) * 0.5;
            if is_land_cell(lon, lat) {
                values.push(f32::NAN);
                continue;
            }
            let zonal = (0.35 * (lon - 120.0)).sin() as f32;
            let meridional = (0.4 * (lat - 28.0)).cos() as f32;
            let gradient = ((lat - 35.0) / 7.0) as f32;
            values.push(1.2 * zonal * meridional - 0.8 * gradient + noise);
        }
    }

    GriddedField::new(name, "°C", lons, lats, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesis_is_deterministic() {
        let a = synthesize("sst_anomaly", 42).unwrap();
        let b = synthesize("sst_anomaly", 42).unwrap();
        for (x, y) in a.values().iter().zip(b.values()) {
            assert!(x.to_bits() == y.to_bits());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = synthesize("sst_anomaly", 1).unwrap();
        let b = synthesize("sst_anomaly", 2).unwrap();
        assert!(a
            .values()
            .iter()
            .zip(b.values())
            .any(|(x, y)| x.to_bits() != y.to_bits()));
    }

    #[test]
    fn test_field_shape_and_masking() {
        let f = synthesize("sst_anomaly", 7).unwrap();
        assert_eq!(f.nlon(), 64);
        assert_eq!(f.nlat(), 56);
        // Some coastal cells are masked, most of the region is ocean
        let missing = f.missing_count();
        assert!(missing > 0);
        assert!(missing < f.values().len() / 2);
        // Anomalies stay in a plausible band
        let (lo, hi) = f.finite_range().unwrap();
        assert!(lo > -5.0 && hi < 5.0);
    }
}
