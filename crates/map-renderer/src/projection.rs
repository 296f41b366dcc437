//! Equirectangular (PlateCarree) canvas mapping.
//!
//! Longitude and latitude map linearly onto the map axes rectangle; no
//! transform is applied to the data grid itself, only to the drawing canvas.

use sst_common::GeoExtent;

/// A rectangle in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// Linear lon/lat to pixel mapping over a fixed extent and target rectangle.
#[derive(Debug, Clone)]
pub struct PlateCarree {
    extent: GeoExtent,
    rect: PixelRect,
}

impl PlateCarree {
    pub fn new(extent: GeoExtent, rect: PixelRect) -> Self {
        Self { extent, rect }
    }

    pub fn extent(&self) -> &GeoExtent {
        &self.extent
    }

    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Geographic coordinates to canvas pixel position. North is up: the
    /// maximum latitude maps to the rectangle's top edge.
    pub fn to_pixel(&self, lon: f64, lat: f64) -> (f32, f32) {
        let fx = (lon - self.extent.lon_min) / self.extent.width();
        let fy = (self.extent.lat_max - lat) / self.extent.height();
        (
            self.rect.x as f32 + (fx * self.rect.w as f64) as f32,
            self.rect.y as f32 + (fy * self.rect.h as f64) as f32,
        )
    }

    /// Canvas pixel position (fractional, e.g. pixel center) to lon/lat.
    pub fn to_geo(&self, px: f64, py: f64) -> (f64, f64) {
        let fx = (px - self.rect.x as f64) / self.rect.w as f64;
        let fy = (py - self.rect.y as f64) / self.rect.h as f64;
        (
            self.extent.lon_min + fx * self.extent.width(),
            self.extent.lat_max - fy * self.extent.height(),
        )
    }
}
