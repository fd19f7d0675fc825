// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Service instance repository for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::sqlite::SqlitePool;

use crate::error::DbError;
use crate::types::{InsertOutcome, Instance, InstanceId};

#[async_trait]
pub trait InstanceStore: Send + Sync {
	async fn get_instance(&self, id: &InstanceId) -> Result<Option<Instance>, DbError>;
	async fn save_instance(&self, instance: &Instance) -> Result<(), DbError>;
	async fn insert_instance_if_absent(&self, instance: &Instance)
		-> Result<InsertOutcome, DbError>;
	async fn delete_instance(&self, id: &InstanceId) -> Result<bool, DbError>;
	async fn count_instances(&self) -> Result<i64, DbError>;
}

/// Repository for service instance database operations.
///
/// The `instances.id` primary key is what keeps instance ids unique; nothing
/// here checks for existence before writing.
#[derive(Clone)]
pub struct InstanceRepository {
	pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct InstanceRow {
	id: String,
	organization_guid: String,
	space_guid: String,
	parameters: String,
	created_at: String,
}

impl TryFrom<InstanceRow> for Instance {
	type Error = DbError;

	fn try_from(row: InstanceRow) -> Result<Self, DbError> {
		let parameters: Map<String, Value> = serde_json::from_str(&row.parameters)?;
		let created_at = DateTime::parse_from_rfc3339(&row.created_at)
			.map_err(|e| DbError::Internal(format!("invalid created_at: {e}")))?
			.with_timezone(&Utc);

		Ok(Instance {
			id: InstanceId::from(row.id),
			organization_guid: row.organization_guid,
			space_guid: row.space_guid,
			parameters,
			created_at,
		})
	}
}

impl InstanceRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Get an instance by ID.
	///
	/// # Returns
	/// `None` if no instance has been provisioned under this ID.
	#[tracing::instrument(skip(self), fields(instance_id = %id))]
	pub async fn get_instance(&self, id: &InstanceId) -> Result<Option<Instance>, DbError> {
		let row = sqlx::query_as::<_, InstanceRow>(
			r#"
			SELECT id, organization_guid, space_guid, parameters, created_at
			FROM instances
			WHERE id = ?
			"#,
		)
		.bind(id.as_str())
		.fetch_optional(&self.pool)
		.await?;

		row.map(Instance::try_from).transpose()
	}

	/// Insert or replace an instance.
	#[tracing::instrument(skip(self, instance), fields(instance_id = %instance.id))]
	pub async fn save_instance(&self, instance: &Instance) -> Result<(), DbError> {
		let parameters = serde_json::to_string(&instance.parameters)?;
		sqlx::query(
			r#"
			INSERT INTO instances (id, organization_guid, space_guid, parameters, created_at)
			VALUES (?, ?, ?, ?, ?)
			ON CONFLICT(id) DO UPDATE SET
				organization_guid = excluded.organization_guid,
				space_guid = excluded.space_guid,
				parameters = excluded.parameters
			"#,
		)
		.bind(instance.id.as_str())
		.bind(&instance.organization_guid)
		.bind(&instance.space_guid)
		.bind(parameters)
		.bind(instance.created_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(instance_id = %instance.id, "instance saved");
		Ok(())
	}

	/// Insert an instance unless one with the same ID already exists.
	///
	/// The insert and the read-back of a pre-existing row run in a single
	/// transaction, so concurrent callers racing on one ID see exactly one
	/// `Inserted`.
	///
	/// # Returns
	/// `InsertOutcome::AlreadyExists` carries the stored row, which is left
	/// untouched.
	#[tracing::instrument(skip(self, instance), fields(instance_id = %instance.id))]
	pub async fn insert_instance_if_absent(
		&self,
		instance: &Instance,
	) -> Result<InsertOutcome, DbError> {
		let parameters = serde_json::to_string(&instance.parameters)?;
		let mut tx = self.pool.begin().await?;

		let inserted = sqlx::query(
			r#"
			INSERT INTO instances (id, organization_guid, space_guid, parameters, created_at)
			VALUES (?, ?, ?, ?, ?)
			ON CONFLICT(id) DO NOTHING
			"#,
		)
		.bind(instance.id.as_str())
		.bind(&instance.organization_guid)
		.bind(&instance.space_guid)
		.bind(parameters)
		.bind(instance.created_at.to_rfc3339())
		.execute(&mut *tx)
		.await?
		.rows_affected();

		if inserted > 0 {
			tx.commit().await?;
			tracing::debug!(instance_id = %instance.id, "instance inserted");
			return Ok(InsertOutcome::Inserted);
		}

		let row = sqlx::query_as::<_, InstanceRow>(
			r#"
			SELECT id, organization_guid, space_guid, parameters, created_at
			FROM instances
			WHERE id = ?
			"#,
		)
		.bind(instance.id.as_str())
		.fetch_optional(&mut *tx)
		.await?;
		tx.commit().await?;

		match row {
			Some(row) => Ok(InsertOutcome::AlreadyExists(Instance::try_from(row)?)),
			None => Err(DbError::Internal(format!(
				"instance {} neither inserted nor found",
				instance.id
			))),
		}
	}

	/// Delete an instance by ID.
	///
	/// # Returns
	/// `true` if a row was removed.
	#[tracing::instrument(skip(self), fields(instance_id = %id))]
	pub async fn delete_instance(&self, id: &InstanceId) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM instances WHERE id = ?")
			.bind(id.as_str())
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}

	/// Count provisioned instances.
	#[tracing::instrument(skip(self))]
	pub async fn count_instances(&self) -> Result<i64, DbError> {
		let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM instances")
			.fetch_one(&self.pool)
			.await?;
		Ok(count)
	}
}

#[async_trait]
impl InstanceStore for InstanceRepository {
	async fn get_instance(&self, id: &InstanceId) -> Result<Option<Instance>, DbError> {
		self.get_instance(id).await
	}

	async fn save_instance(&self, instance: &Instance) -> Result<(), DbError> {
		self.save_instance(instance).await
	}

	async fn insert_instance_if_absent(
		&self,
		instance: &Instance,
	) -> Result<InsertOutcome, DbError> {
		self.insert_instance_if_absent(instance).await
	}

	async fn delete_instance(&self, id: &InstanceId) -> Result<bool, DbError> {
		self.delete_instance(id).await
	}

	async fn count_instances(&self) -> Result<i64, DbError> {
		self.count_instances().await
	}
}
