//! Gridded scalar field over regular lon/lat axes.

use crate::error::{SstError, SstResult};
use crate::extent::GeoExtent;
use serde::{Deserialize, Serialize};

/// A rectangular grid of scalar values indexed by lon/lat coordinate axes.
///
/// Values are stored row-major with shape `(lats.len(), lons.len())`; row 0
/// is the southernmost latitude. Cells may hold NaN for missing data (land
/// cells in a sea-surface field); axes must be strictly increasing and free
/// of NaN.
///
/// The serde representation of this struct is the on-disk dataset format:
/// a self-describing JSON document keyed by coordinate and variable names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GriddedField {
    /// Variable name, e.g. "sst_anomaly"
    pub name: String,
    /// Physical unit, e.g. "°C"
    pub units: String,
    /// Longitudes in degrees east, strictly increasing
    pub lons: Vec<f64>,
    /// Latitudes in degrees north, strictly increasing
    pub lats: Vec<f64>,
    /// Row-major values, shape (lats.len(), lons.len()).
    /// Missing cells are NaN in memory and `null` on the wire (JSON has no NaN).
    #[serde(with = "nullable_values")]
    values: Vec<f32>,
}

mod nullable_values {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(values: &[f32], ser: S) -> Result<S::Ok, S::Error> {
        let wire: Vec<Option<f32>> = values
            .iter()
            .map(|&v| if v.is_nan() { None } else { Some(v) })
            .collect();
        wire.serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<f32>, D::Error> {
        let wire: Vec<Option<f32>> = Vec::deserialize(de)?;
        Ok(wire.into_iter().map(|v| v.unwrap_or(f32::NAN)).collect())
    }
}

impl GriddedField {
    /// Construct a field, enforcing the grid invariants.
    pub fn new(
        name: impl Into<String>,
        units: impl Into<String>,
        lons: Vec<f64>,
        lats: Vec<f64>,
        values: Vec<f32>,
    ) -> SstResult<Self> {
        let field = Self {
            name: name.into(),
            units: units.into(),
            lons,
            lats,
            values,
        };
        field.check_invariants()?;
        Ok(field)
    }

    /// Re-validate a field deserialized from storage.
    pub fn check_invariants(&self) -> SstResult<()> {
        check_axis(&self.lons, "longitude")?;
        check_axis(&self.lats, "latitude")?;
        if self.values.len() != self.lats.len() * self.lons.len() {
            // Report the closest row/col interpretation of the flat buffer.
            let rows = if self.lons.is_empty() {
                0
            } else {
                self.values.len() / self.lons.len()
            };
            return Err(SstError::ShapeMismatch {
                rows,
                cols: self.lons.len(),
                nlat: self.lats.len(),
                nlon: self.lons.len(),
            });
        }
        Ok(())
    }

    pub fn nlon(&self) -> usize {
        self.lons.len()
    }

    pub fn nlat(&self) -> usize {
        self.lats.len()
    }

    /// Value at (latitude row, longitude column).
    pub fn value_at(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.nlat() || col >= self.nlon() {
            return None;
        }
        Some(self.values[row * self.nlon() + col])
    }

    /// Raw row-major value buffer.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Bounding box of the coordinate axes.
    pub fn bounding_extent(&self) -> GeoExtent {
        GeoExtent::new(
            self.lons[0],
            self.lons[self.nlon() - 1],
            self.lats[0],
            self.lats[self.nlat() - 1],
        )
    }

    /// Min/max over finite values, ignoring NaN. None if nothing is finite.
    pub fn finite_range(&self) -> Option<(f32, f32)> {
        let mut range: Option<(f32, f32)> = None;
        for &v in &self.values {
            if v.is_finite() {
                range = Some(match range {
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                    None => (v, v),
                });
            }
        }
        range
    }

    /// Count of NaN (missing) cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }
}

fn check_axis(axis: &[f64], name: &'static str) -> SstResult<()> {
    if axis.len() < 2 {
        return Err(SstError::NonMonotonicAxis { axis: name });
    }
    for w in axis.windows(2) {
        if !w[0].is_finite() || !w[1].is_finite() || w[1] <= w[0] {
            return Err(SstError::NonMonotonicAxis { axis: name });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_field() -> GriddedField {
        GriddedField::new(
            "sst_anomaly",
            "°C",
            vec![120.0, 120.25, 120.5],
            vec![28.0, 28.25],
            vec![0.1, 0.2, 0.3, -0.1, -0.2, -0.3],
        )
        .unwrap()
    }

    #[test]
    fn test_value_indexing() {
        let f = small_field();
        assert_eq!(f.value_at(0, 0), Some(0.1));
        assert_eq!(f.value_at(1, 2), Some(-0.3));
        assert_eq!(f.value_at(2, 0), None);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let err = GriddedField::new(
            "sst_anomaly",
            "°C",
            vec![120.0, 120.25, 120.5],
            vec![28.0, 28.25],
            vec![0.0; 5],
        )
        .unwrap_err();
        assert!(matches!(err, SstError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_non_monotonic_axis_rejected() {
        let err = GriddedField::new(
            "sst_anomaly",
            "°C",
            vec![120.0, 120.0, 120.5],
            vec![28.0, 28.25],
            vec![0.0; 6],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SstError::NonMonotonicAxis { axis: "longitude" }
        ));
    }

    #[test]
    fn test_finite_range_skips_nan() {
        let f = GriddedField::new(
            "sst_anomaly",
            "°C",
            vec![120.0, 120.25],
            vec![28.0, 28.25],
            vec![0.5, f32::NAN, -1.5, 0.0],
        )
        .unwrap();
        assert_eq!(f.finite_range(), Some((-1.5, 0.5)));
        assert_eq!(f.missing_count(), 1);
    }

    #[test]
    fn test_bounding_extent() {
        let f = small_field();
        let e = f.bounding_extent();
        assert_eq!(e.lon_min, 120.0);
        assert_eq!(e.lon_max, 120.5);
        assert_eq!(e.lat_min, 28.0);
        assert_eq!(e.lat_max, 28.25);
    }

    #[test]
    fn test_serde_roundtrip_with_missing_cells() {
        let f = GriddedField::new(
            "sst_anomaly",
            "°C",
            vec![120.0, 120.25],
            vec![28.0, 28.25],
            vec![0.5, f32::NAN, -1.5, 0.0],
        )
        .unwrap();
        let json = serde_json::to_string(&f).unwrap();
        assert!(json.contains("null"));
        let back: GriddedField = serde_json::from_str(&json).unwrap();
        assert!(back.value_at(0, 1).unwrap().is_nan());
        assert_eq!(back.value_at(1, 0), Some(-1.5));
    }

    #[test]
    fn test_serde_roundtrip_preserves_values() {
        let f = small_field();
        let json = serde_json::to_string(&f).unwrap();
        let back: GriddedField = serde_json::from_str(&json).unwrap();
        back.check_invariants().unwrap();
        assert_eq!(back.values(), f.values());
        assert_eq!(back.lons, f.lons);
        assert_eq!(back.name, f.name);
    }
}
