// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque identifier of a provisioned service instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for InstanceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<String> for InstanceId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

impl From<&str> for InstanceId {
	fn from(id: &str) -> Self {
		Self(id.to_string())
	}
}

/// A provisioned service instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
	pub id: InstanceId,
	pub organization_guid: String,
	pub space_guid: String,
	pub parameters: Map<String, Value>,
	pub created_at: DateTime<Utc>,
}

impl Instance {
	pub fn new(
		id: InstanceId,
		organization_guid: impl Into<String>,
		space_guid: impl Into<String>,
		parameters: Map<String, Value>,
	) -> Self {
		Self {
			id,
			organization_guid: organization_guid.into(),
			space_guid: space_guid.into(),
			parameters,
			created_at: Utc::now(),
		}
	}

	/// True when this instance lives in the given organization and space.
	pub fn is_placed_in(&self, organization_guid: &str, space_guid: &str) -> bool {
		self.organization_guid == organization_guid && self.space_guid == space_guid
	}
}

/// Result of an insert that must not overwrite an existing row.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
	Inserted,
	AlreadyExists(Instance),
}
