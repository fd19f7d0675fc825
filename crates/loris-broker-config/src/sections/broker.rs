// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Service broker settings.

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

const DEFAULT_DASHBOARD_BASE_URL: &str = "https://10.128.10.4";

/// Broker configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct BrokerConfig {
	/// Host that per-instance dashboard URLs are built on.
	pub dashboard_base_url: String,
}

impl Default for BrokerConfig {
	fn default() -> Self {
		Self {
			dashboard_base_url: DEFAULT_DASHBOARD_BASE_URL.to_string(),
		}
	}
}

impl BrokerConfig {
	/// Reject base URLs that cannot prefix a dashboard link.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let parsed = Url::parse(&self.dashboard_base_url).map_err(|e| ConfigError::InvalidValue {
			key: "broker.dashboard_base_url".to_string(),
			message: e.to_string(),
		})?;

		match parsed.scheme() {
			"http" | "https" => Ok(()),
			other => Err(ConfigError::InvalidValue {
				key: "broker.dashboard_base_url".to_string(),
				message: format!("unsupported scheme '{other}'"),
			}),
		}
	}
}

/// Broker configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrokerConfigLayer {
	#[serde(default)]
	pub dashboard_base_url: Option<String>,
}

impl BrokerConfigLayer {
	pub fn merge(&mut self, other: BrokerConfigLayer) {
		if other.dashboard_base_url.is_some() {
			self.dashboard_base_url = other.dashboard_base_url;
		}
	}

	pub fn finalize(self) -> BrokerConfig {
		BrokerConfig {
			dashboard_base_url: self
				.dashboard_base_url
				.unwrap_or_else(|| DEFAULT_DASHBOARD_BASE_URL.to_string()),
		}
	}
}
