// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use loris_broker_provisioning::ProvisioningError;
use serde::Serialize;
use utoipa::ToSchema;

/// Server error types for broker operations.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Provisioning contract violation or failure.
	#[error(transparent)]
	Provisioning(#[from] ProvisioningError),
}

/// Error response body for unexpected failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

/// Body of responses that carry no fields (`{}`).
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct EmptyResponse {}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		match self {
			ServerError::Provisioning(ProvisioningError::Conflict(_)) => {
				(StatusCode::CONFLICT, Json(EmptyResponse {})).into_response()
			}
			ServerError::Provisioning(ProvisioningError::Gone(_)) => {
				(StatusCode::GONE, Json(EmptyResponse {})).into_response()
			}
			ServerError::Provisioning(ProvisioningError::Database(e)) => {
				tracing::error!(error = %e, "database error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					Json(ErrorResponse {
						error: "database_error".to_string(),
						message: "A database error occurred".to_string(),
					}),
				)
					.into_response()
			}
		}
	}
}
