// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Service instance provisioning HTTP handlers.
//!
//! Implements the broker's instance lifecycle endpoints under
//! `/v2/service_instances/{instance_id}`.

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use loris_broker_db::InstanceId;
use loris_broker_provisioning::{ProvisionOutcome, ProvisionRequest};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::error::{EmptyResponse, ErrorResponse, ServerError};

/// Body of a provision request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProvisionInstanceRequest {
	pub organization_guid: String,
	pub plan_id: String,
	pub service_id: String,
	pub space_guid: String,
	#[serde(default)]
	#[schema(value_type = Object)]
	pub parameters: Map<String, Value>,
}

/// Body of an update request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateInstanceRequest {
	pub service_id: String,
}

/// Query parameters of a deprovision request.
#[derive(Debug, Deserialize)]
pub struct DeprovisionParams {
	pub service_id: String,
	pub plan_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
	pub dashboard_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InstanceResponse {
	pub dashboard_url: String,
	#[schema(value_type = Object)]
	pub parameters: Map<String, Value>,
}

#[utoipa::path(
	put,
	path = "/v2/service_instances/{instance_id}",
	params(("instance_id" = String, Path, description = "Instance identifier")),
	request_body = ProvisionInstanceRequest,
	responses(
		(status = 201, description = "Instance provisioned", body = DashboardResponse),
		(status = 200, description = "Identical instance already provisioned", body = DashboardResponse),
		(status = 409, description = "Instance exists in a different organization or space", body = EmptyResponse),
		(status = 500, description = "Internal server error", body = ErrorResponse)
	),
	tag = "service-instances"
)]
/// PUT /v2/service_instances/{instance_id} - Provision an instance.
#[instrument(skip(state, payload), fields(instance_id = %instance_id))]
pub async fn create_instance(
	State(state): State<AppState>,
	Path(instance_id): Path<String>,
	Json(payload): Json<ProvisionInstanceRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let request = ProvisionRequest {
		organization_guid: payload.organization_guid,
		space_guid: payload.space_guid,
		service_id: payload.service_id,
		plan_id: payload.plan_id,
		parameters: payload.parameters,
	};

	let outcome = state
		.provisioning
		.create(InstanceId::from(instance_id), request)
		.await?;

	let status = match outcome {
		ProvisionOutcome::Created { .. } => StatusCode::CREATED,
		ProvisionOutcome::Existing { .. } => StatusCode::OK,
	};

	Ok((
		status,
		Json(DashboardResponse {
			dashboard_url: outcome.dashboard_url().to_string(),
		}),
	))
}

#[utoipa::path(
	patch,
	path = "/v2/service_instances/{instance_id}",
	params(("instance_id" = String, Path, description = "Instance identifier")),
	request_body = UpdateInstanceRequest,
	responses(
		(status = 200, description = "Update accepted", body = EmptyResponse)
	),
	tag = "service-instances"
)]
/// PATCH /v2/service_instances/{instance_id} - Update an instance.
#[instrument(skip(state, payload), fields(instance_id = %instance_id))]
pub async fn update_instance(
	State(state): State<AppState>,
	Path(instance_id): Path<String>,
	Json(payload): Json<UpdateInstanceRequest>,
) -> Result<impl IntoResponse, ServerError> {
	state
		.provisioning
		.update(&InstanceId::from(instance_id), &payload.service_id)
		.await?;

	Ok((StatusCode::OK, Json(EmptyResponse {})))
}

#[utoipa::path(
	delete,
	path = "/v2/service_instances/{instance_id}",
	params(
		("instance_id" = String, Path, description = "Instance identifier"),
		("service_id" = String, Query, description = "Service the instance belongs to"),
		("plan_id" = String, Query, description = "Plan the instance was provisioned with"),
	),
	responses(
		(status = 200, description = "Instance deprovisioned", body = EmptyResponse),
		(status = 410, description = "Instance does not exist", body = EmptyResponse),
		(status = 500, description = "Internal server error", body = ErrorResponse)
	),
	tag = "service-instances"
)]
/// DELETE /v2/service_instances/{instance_id} - Deprovision an instance.
#[instrument(skip(state, params), fields(instance_id = %instance_id))]
pub async fn delete_instance(
	State(state): State<AppState>,
	Path(instance_id): Path<String>,
	Query(params): Query<DeprovisionParams>,
) -> Result<impl IntoResponse, ServerError> {
	state
		.provisioning
		.delete(
			&InstanceId::from(instance_id),
			&params.service_id,
			&params.plan_id,
		)
		.await?;

	Ok((StatusCode::OK, Json(EmptyResponse {})))
}

#[utoipa::path(
	get,
	path = "/v2/service_instances/{instance_id}",
	params(("instance_id" = String, Path, description = "Instance identifier")),
	responses(
		(status = 200, description = "Instance details", body = InstanceResponse),
		(status = 410, description = "Instance does not exist", body = EmptyResponse),
		(status = 500, description = "Internal server error", body = ErrorResponse)
	),
	tag = "service-instances"
)]
/// GET /v2/service_instances/{instance_id} - Fetch a provisioned instance.
#[instrument(skip(state), fields(instance_id = %instance_id))]
pub async fn get_instance(
	State(state): State<AppState>,
	Path(instance_id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let instance = state
		.provisioning
		.fetch(&InstanceId::from(instance_id))
		.await?;

	Ok(Json(InstanceResponse {
		dashboard_url: state.provisioning.dashboard_url(&instance.id),
		parameters: instance.parameters,
	}))
}
