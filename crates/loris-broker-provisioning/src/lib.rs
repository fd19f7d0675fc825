// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Service instance provisioning for the Loris broker.
//!
//! Implements the create/update/delete contract of a service broker:
//! - Create is idempotent for an identical organization and space
//! - Create under a reused id with a different organization or space conflicts
//! - Delete of an unknown id reports the instance as gone

mod dashboard;
mod error;
mod request;
mod service;

pub use dashboard::DashboardUrls;
pub use error::ProvisioningError;
pub use request::{ProvisionOutcome, ProvisionRequest};
pub use service::ProvisioningService;
