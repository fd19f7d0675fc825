// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Health HTTP handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
	Healthy,
	Unhealthy,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
	pub status: HealthStatus,
	pub database: String,
	pub instances: Option<i64>,
	pub timestamp: String,
	pub duration_ms: u64,
	pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Broker is healthy", body = HealthResponse),
        (status = 503, description = "Broker is unhealthy", body = HealthResponse)
    ),
    tag = "health"
)]
/// GET /health - Database-backed health check.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	use tokio::time::Instant;

	let start = Instant::now();

	let (status, database, instances) = match state.instance_repo.count_instances().await {
		Ok(count) => (HealthStatus::Healthy, "ok".to_string(), Some(count)),
		Err(e) => {
			tracing::warn!(error = %e, "health check database probe failed");
			(HealthStatus::Unhealthy, "unavailable".to_string(), None)
		}
	};

	let response = HealthResponse {
		status,
		database,
		instances,
		timestamp: chrono::Utc::now().to_rfc3339(),
		duration_ms: start.elapsed().as_millis() as u64,
		version: env!("CARGO_PKG_VERSION").to_string(),
	};

	let http_status = match status {
		HealthStatus::Healthy => StatusCode::OK,
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
	};

	(http_status, Json(response))
}
