// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! OpenAPI document for the broker HTTP API.

use utoipa::OpenApi;

use crate::error::{EmptyResponse, ErrorResponse};
use crate::routes::{health, service_instances};

#[derive(OpenApi)]
#[openapi(
	info(
		title = "Loris Broker API",
		description = "Service broker for provisioning Loris instances"
	),
	paths(
		health::health_check,
		service_instances::create_instance,
		service_instances::update_instance,
		service_instances::delete_instance,
		service_instances::get_instance,
	),
	components(schemas(
		health::HealthResponse,
		health::HealthStatus,
		service_instances::ProvisionInstanceRequest,
		service_instances::UpdateInstanceRequest,
		service_instances::DashboardResponse,
		service_instances::InstanceResponse,
		EmptyResponse,
		ErrorResponse,
	)),
	tags(
		(name = "health", description = "Health checks"),
		(name = "service-instances", description = "Instance provisioning lifecycle")
	)
)]
pub struct ApiDoc;
