//! Preview Server
//!
//! Local harness for the dashboard: serves the host page and built wasm
//! bundle from a static directory, and a pre-aggregated fixture at the
//! chart-data endpoint. Nothing is aggregated here; the fixture is served
//! as written.
//!
//! # Endpoints
//!
//! - `GET /api/chart-data` - Fixture payload
//! - `GET /health` - Liveness probe
//! - everything else - Static files

pub mod error;
pub mod routes;

pub use error::{PreviewError, PreviewResult};

use axum::{routing::get, Router};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::PreviewConfig;

/// Shared state for preview handlers
#[derive(Debug, Clone)]
pub struct PreviewState {
    pub fixture_path: PathBuf,
    pub static_dir: PathBuf,
}

impl PreviewState {
    pub fn new(fixture_path: impl Into<PathBuf>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            fixture_path: fixture_path.into(),
            static_dir: static_dir.into(),
        }
    }

    pub fn from_config(config: &PreviewConfig) -> Self {
        Self::new(&config.fixture_path, &config.static_dir)
    }

    /// Check the fixture and static directory before serving.
    ///
    /// A bad fixture is only warned about: it is re-read per request and may
    /// be fixed while the server runs.
    pub async fn check(&self) -> PreviewResult<()> {
        if !self.static_dir.is_dir() {
            return Err(PreviewError::StaticDir(self.static_dir.clone()));
        }

        match routes::load_fixture(&self.fixture_path).await {
            Ok(data) => tracing::info!(
                "Fixture {:?} OK ({} account types, {} owners, {} institutions)",
                self.fixture_path,
                data.account_types.len(),
                data.owners.len(),
                data.frns.len()
            ),
            Err(e) => tracing::warn!("Fixture not usable yet: {}", e),
        }

        Ok(())
    }
}

/// Build the preview router
pub fn build_router(state: PreviewState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/api/chart-data", get(routes::chart_data))
        .route("/health", get(routes::health))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the preview server
pub async fn serve(state: PreviewState, config: &PreviewConfig) -> PreviewResult<()> {
    state.check().await?;
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Bankdash preview listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PreviewError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Bankdash preview shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tempfile::{tempdir, TempDir};
    use tower::util::ServiceExt;

    const FIXTURE: &str = r#"{
        "account_types": {"labels": ["Savings", "Current"], "values": [3, 1]},
        "owners": {"labels": ["a", "j"], "values": [2, 2]},
        "frns": {"labels": ["204514", "119278"], "values": [9000, 3800.5]}
    }"#;

    fn create_test_app(fixture: Option<&str>) -> (Router, TempDir) {
        let dir = tempdir().unwrap();
        let static_dir = dir.path().join("static");
        std::fs::create_dir(&static_dir).unwrap();
        std::fs::write(static_dir.join("index.html"), "<canvas id=\"accountTypeChart\"></canvas>")
            .unwrap();

        let fixture_path = dir.path().join("chart-data.json");
        if let Some(body) = fixture {
            std::fs::write(&fixture_path, body).unwrap();
        }

        let router = build_router(PreviewState::new(fixture_path, static_dir));
        (router, dir)
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_chart_data_served() {
        let (app, _dir) = create_test_app(Some(FIXTURE));

        let (status, body) = fetch(app, "/api/chart-data").await;
        assert_eq!(status, StatusCode::OK);

        let data = crate::charts::ChartData::from_json(&body).unwrap();
        assert_eq!(data.owners.labels, vec!["a", "j"]);
        assert_eq!(data.frns.values, vec![9000.0, 3800.5]);
    }

    #[tokio::test]
    async fn test_missing_fixture_is_unavailable() {
        let (app, _dir) = create_test_app(None);

        let (status, body) = fetch(app, "/api/chart-data").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("FIXTURE_UNAVAILABLE"));
    }

    #[tokio::test]
    async fn test_mismatched_fixture_rejected() {
        let broken = r#"{
            "account_types": {"labels": ["Savings"], "values": [1, 2]},
            "owners": {"labels": [], "values": []},
            "frns": {"labels": [], "values": []}
        }"#;
        let (app, _dir) = create_test_app(Some(broken));

        let (status, body) = fetch(app, "/api/chart-data").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("INVALID_FIXTURE"));
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = create_test_app(Some(FIXTURE));
        let (status, _) = fetch(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_static_files() {
        let (app, _dir) = create_test_app(Some(FIXTURE));

        let (status, body) = fetch(app.clone(), "/index.html").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("accountTypeChart"));

        let (status, _) = fetch(app, "/missing.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_check_requires_static_dir() {
        let dir = tempdir().unwrap();
        let state = PreviewState::new(dir.path().join("x.json"), dir.path().join("nope"));
        assert!(matches!(state.check().await, Err(PreviewError::StaticDir(_))));

        let state = PreviewState::new(dir.path().join("x.json"), dir.path());
        assert!(state.check().await.is_ok());
    }
}
