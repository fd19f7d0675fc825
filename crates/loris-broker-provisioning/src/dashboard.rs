// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use loris_broker_db::InstanceId;

/// Builds per-instance dashboard links on a fixed base host.
#[derive(Debug, Clone)]
pub struct DashboardUrls {
	base_url: String,
}

impl DashboardUrls {
	pub fn new(base_url: impl Into<String>) -> Self {
		let base_url = base_url.into();
		Self {
			base_url: base_url.trim_end_matches('/').to_string(),
		}
	}

	/// The id is percent-encoded as a single path segment.
	pub fn for_instance(&self, id: &InstanceId) -> String {
		format!(
			"{}/dashboard/{}",
			self.base_url,
			urlencoding::encode(id.as_str())
		)
	}
}
