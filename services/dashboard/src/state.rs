//! Application state and shared resources.

use std::collections::HashMap;
use std::sync::Arc;

use sst_common::{GriddedField, SstResult};
use sst_dataset::FieldStore;
use tokio::sync::RwLock;
use tracing::info;

use map_renderer::MapViewSpec;

/// Shared application state.
///
/// The field is loaded (or synthesized and persisted) once at startup.
/// Rendered PNGs are cached per requested extent so repeated page loads
/// skip the raster pass.
pub struct AppState {
    pub field: Arc<GriddedField>,
    pub view: MapViewSpec,
    pub png_cache: RwLock<HashMap<String, Arc<Vec<u8>>>>,
}

impl AppState {
    pub fn new(data_dir: &str, field_name: &str, seed: u64) -> SstResult<Self> {
        let store = FieldStore::open(data_dir)?;
        let field = store.load_or_create(field_name, seed)?;
        info!(
            field = %field.name,
            nlon = field.nlon(),
            nlat = field.nlat(),
            missing = field.missing_count(),
            "Field ready"
        );

        let mut view = MapViewSpec::default();
        view.title = "NOAA OISST Sea Surface Temperature Anomaly".to_string();
        view.colorbar_label = format!("Anomaly ({})", field.units);

        Ok(Self {
            field: Arc::new(field),
            view,
            png_cache: RwLock::new(HashMap::new()),
        })
    }
}
