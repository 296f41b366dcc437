//! Directory-backed field store.

use std::fs;
use std::path::{Path, PathBuf};

use sst_common::{GriddedField, SstError, SstResult};
use tracing::{debug, info};

/// A directory of persisted fields, one JSON array file per field name.
pub struct FieldStore {
    dir: PathBuf,
}

impl FieldStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> SstResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    /// Load and re-validate a persisted field.
    pub fn load(&self, name: &str) -> SstResult<GriddedField> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Err(SstError::FieldNotFound(name.to_string()));
        }
        let bytes = fs::read(&path)?;
        let field: GriddedField = serde_json::from_slice(&bytes)
            .map_err(|e| SstError::Dataset(format!("{}: {}", path.display(), e)))?;
        field.check_invariants()?;
        debug!(field = name, path = %path.display(), "loaded field");
        Ok(field)
    }

    /// Persist a field under its name.
    pub fn save(&self, field: &GriddedField) -> SstResult<()> {
        let path = self.path_for(&field.name);
        let bytes = serde_json::to_vec(field)?;
        fs::write(&path, bytes)?;
        debug!(field = %field.name, path = %path.display(), "saved field");
        Ok(())
    }

    /// Load the named field, synthesizing and persisting it when absent.
    pub fn load_or_create(&self, name: &str, seed: u64) -> SstResult<GriddedField> {
        if self.exists(name) {
            return self.load(name);
        }
        info!(field = name, seed, "field not persisted, synthesizing");
        let field = crate::synth::synthesize(name, seed)?;
        self.save(&field)?;
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::synthesize;

    #[test]
    fn test_persist_then_reload_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let store = FieldStore::open(dir.path()).unwrap();

        let original = synthesize("sst_anomaly", 42).unwrap();
        store.save(&original).unwrap();
        let reloaded = store.load("sst_anomaly").unwrap();

        assert_eq!(original.lons, reloaded.lons);
        assert_eq!(original.lats, reloaded.lats);
        for (a, b) in original.values().iter().zip(reloaded.values()) {
            // NaN cells survive as NaN; finite values round-trip bitwise
            assert_eq!(a.is_nan(), b.is_nan());
            if a.is_finite() {
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }

    #[test]
    fn test_load_or_create_synthesizes_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = FieldStore::open(dir.path()).unwrap();

        assert!(!store.exists("sst_anomaly"));
        let first = store.load_or_create("sst_anomaly", 7).unwrap();
        assert!(store.exists("sst_anomaly"));

        // Second call loads the persisted copy, not a fresh synthesis
        let second = store.load_or_create("sst_anomaly", 999).unwrap();
        for (a, b) in first.values().iter().zip(second.values()) {
            assert_eq!(a.is_nan(), b.is_nan());
            if a.is_finite() {
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }

    #[test]
    fn test_missing_field_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FieldStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.load("nope"),
            Err(SstError::FieldNotFound(_))
        ));
    }

    #[test]
    fn test_corrupt_file_is_a_dataset_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FieldStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("bad.json"), b"{not json").unwrap();
        assert!(matches!(store.load("bad"), Err(SstError::Dataset(_))));
    }
}
