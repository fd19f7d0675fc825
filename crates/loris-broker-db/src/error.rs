// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persistence errors.

/// Failures surfaced by the instance store.
///
/// Absence is not an error here: lookups return `Option` and deletes `bool`.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
	/// Driver, pool or query failure.
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	/// A stored `parameters` column is not a JSON object.
	#[error("Invalid stored parameters: {0}")]
	Serialization(#[from] serde_json::Error),

	/// Bad connection URL or a row that cannot be mapped back to an instance.
	#[error("Internal: {0}")]
	Internal(String),
}

pub type Result<T> = std::result::Result<T, DbError>;
