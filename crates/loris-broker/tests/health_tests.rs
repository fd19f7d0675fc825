// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Tests for the health and API document endpoints.

mod support;

use axum::http::StatusCode;
use support::*;

#[tokio::test]
async fn health_reports_healthy_database() {
	let app = TestApp::new().await;

	let response = app.get("/health").await;

	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(response).await;
	assert_eq!(body["status"], "healthy");
	assert_eq!(body["database"], "ok");
	assert_eq!(body["instances"], 0);
}

#[tokio::test]
async fn health_reports_unhealthy_when_pool_closed() {
	let app = TestApp::new().await;
	app.state.pool.close().await;

	let response = app.get("/health").await;

	assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
	let body = body_json(response).await;
	assert_eq!(body["status"], "unhealthy");
	assert_eq!(body["database"], "unavailable");
	assert!(!body.to_string().contains("closed"));
	assert!(body["instances"].is_null());
}

#[tokio::test]
async fn openapi_document_lists_instance_paths() {
	let app = TestApp::new().await;

	let response = app.get("/api/openapi.json").await;

	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(response).await;
	assert!(body["paths"]["/v2/service_instances/{instance_id}"].is_object());
	assert!(body["paths"]["/health"].is_object());
}
