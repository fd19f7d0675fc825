// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Loris service broker server.
//!
//! This crate provides the HTTP surface for provisioning, updating and
//! deprovisioning instances backed by a SQLite database.

pub mod api;
pub mod api_docs;
pub mod error;
pub mod routes;

pub use api::{create_app_state, create_router, AppState};
pub use api_docs::ApiDoc;
pub use error::ServerError;
pub use loris_broker_config::ServerConfig;
