//! HTTP request handlers for the dashboard.

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use map_renderer::render_map;
use sst_common::{GeoExtent, SstError};

use crate::state::AppState;

/// Maps domain errors onto HTTP status codes.
pub struct AppError(SstError);

impl From<SstError> for AppError {
    fn from(err: SstError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SstError::InvalidExtent(_)
            | SstError::ShapeMismatch { .. }
            | SstError::NonMonotonicAxis { .. } => StatusCode::BAD_REQUEST,
            SstError::FieldNotFound(_) => StatusCode::NOT_FOUND,
            SstError::Backend(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.0.to_string()).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct MapParams {
    /// Viewport override as "lon_min,lon_max,lat_min,lat_max"
    extent: Option<String>,
}

#[instrument(skip(state))]
pub async fn map_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<MapParams>,
) -> Result<Response, AppError> {
    let cache_key = params.extent.clone().unwrap_or_else(|| "default".to_string());

    if let Some(png) = state.png_cache.read().await.get(&cache_key) {
        debug!(key = %cache_key, "PNG cache hit");
        return Ok(png_response(png.as_ref().clone()));
    }

    let mut view = state.view.clone();
    if let Some(raw) = &params.extent {
        view.extent = GeoExtent::parse(raw)?;
    }

    let figure = render_map(&state.field, &view)?;
    let png = Arc::new(figure.to_png()?);
    info!(key = %cache_key, bytes = png.len(), "Rendered map");

    state
        .png_cache
        .write()
        .await
        .insert(cache_key, Arc::clone(&png));

    Ok(png_response(png.as_ref().clone()))
}

fn png_response(bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "public, max-age=300"),
        ],
        bytes,
    )
        .into_response()
}

pub async fn data_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<sst_common::GriddedField> {
    Json((*state.field).clone())
}

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Dashboard page: the rendered figure above a downsampled raw-data table.
#[instrument(skip(state))]
pub async fn index_handler(Extension(state): Extension<Arc<AppState>>) -> Html<String> {
    let field = &state.field;

    // Every 8th cell keeps the table readable at 0.25° spacing
    let step = 8;
    let mut table = String::new();
    table.push_str("<tr><th>lat \\ lon</th>");
    for col in (0..field.nlon()).step_by(step) {
        let _ = write!(table, "<th>{:.2}°E</th>", field.lons[col]);
    }
    table.push_str("</tr>\n");
    for row in (0..field.nlat()).rev().step_by(step) {
        let _ = write!(table, "<tr><th>{:.2}°N</th>", field.lats[row]);
        for col in (0..field.nlon()).step_by(step) {
            match field.value_at(row, col) {
                Some(v) if v.is_finite() => {
                    let _ = write!(table, "<td>{:.2}</td>", v);
                }
                _ => table.push_str("<td class=\"missing\">&ndash;</td>"),
            }
        }
        table.push_str("</tr>\n");
    }

    let page = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  body {{ font-family: sans-serif; margin: 2em auto; max-width: 960px; color: #222; }}
  h1 {{ color: #1a365d; font-size: 1.3em; }}
  img {{ max-width: 100%; border: 1px solid #ccc; }}
  table {{ border-collapse: collapse; font-size: 0.75em; margin-top: 1.5em; }}
  th, td {{ border: 1px solid #ddd; padding: 2px 6px; text-align: right; }}
  th {{ background: #f0f4f8; }}
  td.missing {{ color: #aaa; }}
</style>
</head>
<body>
<h1>{title}</h1>
<img src="/map.png" alt="SST anomaly map" width="900" height="700">
<h2>Raw data ({units}, every {step}th cell)</h2>
<table>
{table}</table>
<p>Full field as JSON: <a href="/data">/data</a></p>
</body>
</html>
"#,
        title = state.view.title,
        units = field.units,
        step = step,
        table = table,
    );

    Html(page)
}
