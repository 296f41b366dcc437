//! Dataset provider for gridded sea-surface temperature anomaly fields.
//!
//! Fields are persisted as self-describing JSON array files, one per field
//! name. When a field is absent the store synthesizes a deterministic,
//! seeded anomaly field and persists it, so repeated runs see identical
//! data. The provider performs no memoization; callers wanting caching wrap
//! it externally.

pub mod store;
pub mod synth;

pub use store::FieldStore;
pub use synth::synthesize;
