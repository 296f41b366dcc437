//! Geographic extent type and operations.

use crate::error::{SstError, SstResult};
use serde::{Deserialize, Serialize};

/// A geographic extent in degrees, lon/lat (equirectangular).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoExtent {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl GeoExtent {
    pub fn new(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> Self {
        Self {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        }
    }

    /// Parse an extent string: "lon_min,lon_max,lat_min,lat_max"
    pub fn parse(s: &str) -> SstResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(SstError::InvalidExtent(format!(
                "expected 'lon_min,lon_max,lat_min,lat_max', got '{}'",
                s
            )));
        }
        let mut vals = [0.0f64; 4];
        for (i, p) in parts.iter().enumerate() {
            vals[i] = p
                .parse()
                .map_err(|_| SstError::InvalidExtent(format!("invalid number '{}'", p)))?;
        }
        let extent = Self::new(vals[0], vals[1], vals[2], vals[3]);
        extent.validate()?;
        Ok(extent)
    }

    /// Width in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// Height in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Reject degenerate extents (min >= max on either axis).
    pub fn validate(&self) -> SstResult<()> {
        if self.lon_min >= self.lon_max {
            return Err(SstError::InvalidExtent(format!(
                "lon_min ({}) must be < lon_max ({})",
                self.lon_min, self.lon_max
            )));
        }
        if self.lat_min >= self.lat_max {
            return Err(SstError::InvalidExtent(format!(
                "lat_min ({}) must be < lat_max ({})",
                self.lat_min, self.lat_max
            )));
        }
        Ok(())
    }

    /// Check if this extent overlaps another.
    pub fn intersects(&self, other: &GeoExtent) -> bool {
        self.lon_min < other.lon_max
            && self.lon_max > other.lon_min
            && self.lat_min < other.lat_max
            && self.lat_max > other.lat_min
    }

    /// Compute the overlap of two extents.
    pub fn intersection(&self, other: &GeoExtent) -> Option<GeoExtent> {
        if !self.intersects(other) {
            return None;
        }
        Some(GeoExtent {
            lon_min: self.lon_min.max(other.lon_min),
            lon_max: self.lon_max.min(other.lon_max),
            lat_min: self.lat_min.max(other.lat_min),
            lat_max: self.lat_max.min(other.lat_max),
        })
    }

    /// Check if a point lies within this extent.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.lon_min && lon <= self.lon_max && lat >= self.lat_min && lat <= self.lat_max
    }
}

impl std::fmt::Display for GeoExtent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.lon_min, self.lon_max, self.lat_min, self.lat_max
        )
    }
}
