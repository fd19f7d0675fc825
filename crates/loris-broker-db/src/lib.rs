// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! # loris-broker-db
//!
//! Persistence layer for the Loris service broker using SQLite via sqlx.
//!
//! Follows the store/repository split: [`InstanceStore`] is the interface the
//! provisioning service depends on, [`InstanceRepository`] is the concrete
//! implementation holding a `SqlitePool`.
//!
//! Lookups where absence is normal return `Result<Option<T>>`; deletes return
//! `Result<bool>` (true if a row was removed).

pub mod error;
pub mod instance;
pub mod pool;
pub mod testing;
pub mod types;

pub use error::{DbError, Result};
pub use instance::{InstanceRepository, InstanceStore};
pub use pool::{create_pool, run_migrations};
pub use types::{InsertOutcome, Instance, InstanceId};
