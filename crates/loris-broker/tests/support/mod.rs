// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

#![allow(dead_code)]

use axum::{
	body::Body,
	http::{Method, Request},
	response::Response,
	Router,
};
use serde::Serialize;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use loris_broker::{
	api::{create_app_state, create_router, AppState},
	ServerConfig,
};

pub const ORG_GUID: &str = "org-guid-here";
pub const SPACE_GUID: &str = "space-guid-here";
pub const SERVICE_ID: &str = "service-one-id";
pub const PLAN_ID: &str = "plan-one-id";

pub struct TestApp {
	pub router: Router,
	pub state: AppState,
	_temp_dir: TempDir,
}

impl TestApp {
	pub async fn new() -> Self {
		let temp_dir = tempfile::tempdir().unwrap();
		let db_path = temp_dir.path().join("test_broker.db");
		let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
		let pool = loris_broker_db::create_pool(&db_url).await.unwrap();
		loris_broker_db::run_migrations(&pool).await.unwrap();

		let config = ServerConfig::default();
		let state = create_app_state(pool, &config);
		let router = create_router(state.clone());

		Self {
			router,
			state,
			_temp_dir: temp_dir,
		}
	}

	pub async fn get(&self, path: &str) -> Response<Body> {
		self.request(Method::GET, path, Option::<()>::None).await
	}

	pub async fn put(&self, path: &str, body: impl Serialize) -> Response<Body> {
		self.request(Method::PUT, path, Some(body)).await
	}

	pub async fn patch(&self, path: &str, body: impl Serialize) -> Response<Body> {
		self.request(Method::PATCH, path, Some(body)).await
	}

	pub async fn delete(&self, path: &str) -> Response<Body> {
		self.request(Method::DELETE, path, Option::<()>::None).await
	}

	/// Send a raw body with a JSON content type.
	pub async fn put_raw(&self, path: &str, body: &'static str) -> Response<Body> {
		let request = Request::builder()
			.method(Method::PUT)
			.uri(path)
			.header("content-type", "application/json")
			.body(Body::from(body))
			.unwrap();

		self.router.clone().oneshot(request).await.unwrap()
	}

	pub async fn instance_count(&self) -> i64 {
		self.state.instance_repo.count_instances().await.unwrap()
	}

	async fn request<T: Serialize>(
		&self,
		method: Method,
		path: &str,
		body: Option<T>,
	) -> Response<Body> {
		let mut builder = Request::builder().method(method).uri(path);

		let request_body = match body {
			Some(b) => {
				builder = builder.header("content-type", "application/json");
				Body::from(serde_json::to_string(&b).unwrap())
			}
			None => Body::empty(),
		};

		let request = builder.body(request_body).unwrap();

		self.router.clone().oneshot(request).await.unwrap()
	}
}

pub async fn body_json(response: Response<Body>) -> Value {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&bytes).unwrap()
}

pub fn instance_path(id: &str) -> String {
	format!("/v2/service_instances/{id}")
}

pub fn provision_body(org: &str, space: &str) -> Value {
	serde_json::json!({
		"organization_guid": org,
		"plan_id": PLAN_ID,
		"service_id": SERVICE_ID,
		"space_guid": space,
	})
}
