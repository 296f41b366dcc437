//! Common types shared across the sst-atlas workspace.

pub mod error;
pub mod extent;
pub mod field;

pub use error::{SstError, SstResult};
pub use extent::GeoExtent;
pub use field::GriddedField;
