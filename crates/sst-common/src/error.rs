//! Error types for sst-atlas crates.

use thiserror::Error;

/// Result type alias using SstError.
pub type SstResult<T> = Result<T, SstError>;

/// Primary error type for dataset and rendering operations.
#[derive(Debug, Error)]
pub enum SstError {
    /// Value array dimensions disagree with the coordinate axes.
    #[error("value array is {rows}x{cols} but axes describe {nlat} latitudes x {nlon} longitudes")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        nlat: usize,
        nlon: usize,
    },

    /// Requested viewport is degenerate or does not overlap the data.
    #[error("invalid extent: {0}")]
    InvalidExtent(String),

    /// A coordinate axis is not strictly increasing.
    #[error("{axis} axis is not strictly increasing")]
    NonMonotonicAxis { axis: &'static str },

    /// Embedded map assets (land geometry, fonts) could not be used.
    #[error("map backend unavailable: {0}")]
    Backend(String),

    /// Figure construction or encoding failed.
    #[error("rendering failed: {0}")]
    Render(String),

    /// Dataset could not be loaded or persisted.
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Field not present in the store.
    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
