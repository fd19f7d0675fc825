// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Application state and router construction.

use std::sync::Arc;

use axum::{routing::get, Router};
use loris_broker_config::ServerConfig;
use loris_broker_db::InstanceRepository;
use loris_broker_provisioning::{DashboardUrls, ProvisioningService};
use sqlx::SqlitePool;

use crate::routes;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
	pub instance_repo: Arc<InstanceRepository>,
	pub provisioning: Arc<ProvisioningService>,
	pub pool: SqlitePool,
}

/// Wire repositories and services together from a pool and resolved config.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let instance_repo = Arc::new(InstanceRepository::new(pool.clone()));
	let provisioning = Arc::new(ProvisioningService::new(
		instance_repo.clone(),
		DashboardUrls::new(&config.broker.dashboard_base_url),
	));

	AppState {
		instance_repo,
		provisioning,
		pool,
	}
}

/// Create the API router with all routes.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route("/api/openapi.json", get(routes::docs::openapi_json))
		.route(
			"/v2/service_instances/{instance_id}",
			get(routes::service_instances::get_instance)
				.put(routes::service_instances::create_instance)
				.patch(routes::service_instances::update_instance)
				.delete(routes::service_instances::delete_instance),
		)
		.with_state(state)
}
