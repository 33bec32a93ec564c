//! Health check endpoint handlers.

use axum::{extract::State, http::StatusCode};
use serde::Serialize;

use crate::app::AppState;
use crate::response::Data;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub connected: bool,
    pub latency_ms: u64,
}

/// GET /api/v1/health
///
/// 503 with the same body when the database does not answer.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Data<HealthResponse>) {
    let start = std::time::Instant::now();
    let connected = match persistence::db::ping(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };
    let latency_ms = start.elapsed().as_millis() as u64;

    let (status_code, status) = if connected {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status_code,
        Data::new(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database: DatabaseHealth {
                connected,
                latency_ms,
            },
        }),
    )
}
