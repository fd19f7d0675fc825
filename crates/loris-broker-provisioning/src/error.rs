// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use loris_broker_db::{DbError, InstanceId};

/// Errors that can occur while provisioning service instances.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
	#[error("database error: {0}")]
	Database(#[from] DbError),

	#[error("instance {0} already exists in a different organization or space")]
	Conflict(InstanceId),

	#[error("instance {0} does not exist")]
	Gone(InstanceId),
}
