//! Preview Routes
//!
//! - GET /api/chart-data - Fixture aggregate payload
//! - GET /health - Liveness probe

use axum::{extract::State, http::StatusCode, Json};
use std::path::Path;
use std::sync::Arc;

use super::error::{PreviewError, PreviewResult};
use super::PreviewState;
use crate::charts::ChartData;

/// GET /api/chart-data
///
/// The fixture is re-read on every request so edits show up on the next
/// dashboard refresh. A broken fixture produces an error response, which the
/// dashboard treats like any failed fetch.
pub async fn chart_data(State(state): State<Arc<PreviewState>>) -> PreviewResult<Json<ChartData>> {
    let data = load_fixture(&state.fixture_path).await?;
    tracing::debug!(
        account_types = data.account_types.len(),
        owners = data.owners.len(),
        frns = data.frns.len(),
        "Serving chart data"
    );
    Ok(Json(data))
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Read, decode and validate a fixture payload
pub async fn load_fixture(path: &Path) -> PreviewResult<ChartData> {
    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PreviewError::Fixture {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

    let data = ChartData::from_json(&body)?;
    data.validate()?;
    Ok(data)
}
