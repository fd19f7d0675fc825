// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde_json::{Map, Value};

/// Everything a caller supplies to provision an instance.
#[derive(Debug, Clone)]
pub struct ProvisionRequest {
	pub organization_guid: String,
	pub space_guid: String,
	pub service_id: String,
	pub plan_id: String,
	pub parameters: Map<String, Value>,
}

/// How a create request was satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
	/// A new instance was stored.
	Created { dashboard_url: String },
	/// An identical instance was already stored; nothing was written.
	Existing { dashboard_url: String },
}

impl ProvisionOutcome {
	pub fn dashboard_url(&self) -> &str {
		match self {
			Self::Created { dashboard_url } | Self::Existing { dashboard_url } => dashboard_url,
		}
	}
}
