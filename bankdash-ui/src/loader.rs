//! Chart Data Loader
//!
//! Single request to the aggregate-data endpoint. No retry: a failure is
//! reported to the caller, which logs it and keeps the charts it has.

use bankdash::charts::ChartData;
use gloo_net::http::Request;
use thiserror::Error;

/// Why a chart data load failed
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected status {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("Parse error: {0}")]
    Decode(String),
}

/// Fetch the aggregate payload from `endpoint`. Any non-2xx status or body
/// that does not decode is a failure.
pub async fn fetch_chart_data(endpoint: &str) -> Result<ChartData, LoadError> {
    let response = Request::get(endpoint)
        .send()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(LoadError::Status {
            endpoint: endpoint.to_string(),
            status: response.status(),
        });
    }

    response
        .json::<ChartData>()
        .await
        .map_err(|e| LoadError::Decode(e.to_string()))
}
