// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use loris_broker_db::{InsertOutcome, Instance, InstanceId, InstanceStore};

use crate::dashboard::DashboardUrls;
use crate::error::ProvisioningError;
use crate::request::{ProvisionOutcome, ProvisionRequest};

/// Result type for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisioningError>;

/// Service for provisioning and deprovisioning service instances.
///
/// All existence checks are delegated to the store's atomic operations, so
/// the service holds no state of its own beyond configuration.
#[derive(Clone)]
pub struct ProvisioningService {
	store: Arc<dyn InstanceStore>,
	dashboard: DashboardUrls,
}

impl ProvisioningService {
	/// Create a new provisioning service.
	pub fn new(store: Arc<dyn InstanceStore>, dashboard: DashboardUrls) -> Self {
		Self { store, dashboard }
	}

	/// Provision an instance.
	///
	/// - No instance under `id`: stores one and returns `Created`
	/// - Same organization and space already stored: returns `Existing`
	/// - Different organization or space stored: `Conflict`, stored row kept
	#[tracing::instrument(
		skip(self, request),
		fields(
			instance_id = %id,
			organization_guid = %request.organization_guid,
			space_guid = %request.space_guid,
			service_id = %request.service_id,
			plan_id = %request.plan_id,
		)
	)]
	pub async fn create(&self, id: InstanceId, request: ProvisionRequest) -> Result<ProvisionOutcome> {
		let instance = Instance::new(
			id,
			request.organization_guid,
			request.space_guid,
			request.parameters,
		);
		let dashboard_url = self.dashboard.for_instance(&instance.id);

		match self.store.insert_instance_if_absent(&instance).await? {
			InsertOutcome::Inserted => {
				tracing::info!(instance_id = %instance.id, "provisioned instance");
				Ok(ProvisionOutcome::Created { dashboard_url })
			}
			InsertOutcome::AlreadyExists(existing)
				if existing.is_placed_in(&instance.organization_guid, &instance.space_guid) =>
			{
				tracing::debug!(instance_id = %instance.id, "instance already provisioned");
				Ok(ProvisionOutcome::Existing { dashboard_url })
			}
			InsertOutcome::AlreadyExists(existing) => {
				tracing::warn!(
					instance_id = %instance.id,
					existing_organization_guid = %existing.organization_guid,
					existing_space_guid = %existing.space_guid,
					"instance id reused with a different organization or space"
				);
				Err(ProvisioningError::Conflict(instance.id))
			}
		}
	}

	/// Update an instance. Accepted for any id; stored state is not changed.
	#[tracing::instrument(skip(self), fields(instance_id = %id))]
	pub async fn update(&self, id: &InstanceId, service_id: &str) -> Result<()> {
		tracing::debug!(instance_id = %id, service_id, "update accepted");
		Ok(())
	}

	/// Deprovision an instance, reporting `Gone` if nothing was stored under `id`.
	#[tracing::instrument(skip(self), fields(instance_id = %id))]
	pub async fn delete(&self, id: &InstanceId, service_id: &str, plan_id: &str) -> Result<()> {
		if self.store.delete_instance(id).await? {
			tracing::info!(instance_id = %id, service_id, plan_id, "deprovisioned instance");
			Ok(())
		} else {
			tracing::debug!(instance_id = %id, "delete requested for unknown instance");
			Err(ProvisioningError::Gone(id.clone()))
		}
	}

	/// Look up a provisioned instance.
	#[tracing::instrument(skip(self), fields(instance_id = %id))]
	pub async fn fetch(&self, id: &InstanceId) -> Result<Instance> {
		self
			.store
			.get_instance(id)
			.await?
			.ok_or_else(|| ProvisioningError::Gone(id.clone()))
	}

	pub fn dashboard_url(&self, id: &InstanceId) -> String {
		self.dashboard.for_instance(id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use loris_broker_db::DbError;
	use serde_json::{Map, Value};
	use std::collections::HashMap;
	use std::sync::Mutex;

	const INSTANCE_ID: &str = "7f3c1d2e-0000-4000-8000-000000000001";
	const ORGANIZATION_ID: &str = "7f3c1d2e-0000-4000-8000-000000000002";
	const SPACE_ID: &str = "7f3c1d2e-0000-4000-8000-000000000003";
	const ALTERNATE_ID: &str = "7f3c1d2e-0000-4000-8000-000000000004";

	#[derive(Default)]
	struct MemoryStore {
		instances: Mutex<HashMap<InstanceId, Instance>>,
	}

	#[async_trait]
	impl InstanceStore for MemoryStore {
		async fn get_instance(&self, id: &InstanceId) -> std::result::Result<Option<Instance>, DbError> {
			Ok(self.instances.lock().unwrap().get(id).cloned())
		}

		async fn save_instance(&self, instance: &Instance) -> std::result::Result<(), DbError> {
			self
				.instances
				.lock()
				.unwrap()
				.insert(instance.id.clone(), instance.clone());
			Ok(())
		}

		async fn insert_instance_if_absent(
			&self,
			instance: &Instance,
		) -> std::result::Result<InsertOutcome, DbError> {
			let mut instances = self.instances.lock().unwrap();
			match instances.get(&instance.id) {
				Some(existing) => Ok(InsertOutcome::AlreadyExists(existing.clone())),
				None => {
					instances.insert(instance.id.clone(), instance.clone());
					Ok(InsertOutcome::Inserted)
				}
			}
		}

		async fn delete_instance(&self, id: &InstanceId) -> std::result::Result<bool, DbError> {
			Ok(self.instances.lock().unwrap().remove(id).is_some())
		}

		async fn count_instances(&self) -> std::result::Result<i64, DbError> {
			Ok(self.instances.lock().unwrap().len() as i64)
		}
	}

	struct BrokenStore;

	#[async_trait]
	impl InstanceStore for BrokenStore {
		async fn get_instance(&self, _id: &InstanceId) -> std::result::Result<Option<Instance>, DbError> {
			Err(DbError::Internal("offline".to_string()))
		}

		async fn save_instance(&self, _instance: &Instance) -> std::result::Result<(), DbError> {
			Err(DbError::Internal("offline".to_string()))
		}

		async fn insert_instance_if_absent(
			&self,
			_instance: &Instance,
		) -> std::result::Result<InsertOutcome, DbError> {
			Err(DbError::Internal("offline".to_string()))
		}

		async fn delete_instance(&self, _id: &InstanceId) -> std::result::Result<bool, DbError> {
			Err(DbError::Internal("offline".to_string()))
		}

		async fn count_instances(&self) -> std::result::Result<i64, DbError> {
			Err(DbError::Internal("offline".to_string()))
		}
	}

	fn service() -> (ProvisioningService, Arc<MemoryStore>) {
		let store = Arc::new(MemoryStore::default());
		let service = ProvisioningService::new(store.clone(), DashboardUrls::new("https://10.128.10.4"));
		(service, store)
	}

	fn request(space_guid: &str) -> ProvisionRequest {
		ProvisionRequest {
			organization_guid: ORGANIZATION_ID.to_string(),
			space_guid: space_guid.to_string(),
			service_id: "service".to_string(),
			plan_id: "plan".to_string(),
			parameters: Map::new(),
		}
	}

	fn existing_instance() -> Instance {
		Instance::new(INSTANCE_ID.into(), ORGANIZATION_ID, SPACE_ID, Map::new())
	}

	#[tokio::test]
	async fn create_stores_new_instance() {
		let (service, store) = service();

		let outcome = service.create(INSTANCE_ID.into(), request(SPACE_ID)).await.unwrap();

		assert_eq!(
			outcome,
			ProvisionOutcome::Created {
				dashboard_url: format!("https://10.128.10.4/dashboard/{INSTANCE_ID}"),
			}
		);
		assert_eq!(store.count_instances().await.unwrap(), 1);
	}

	#[tokio::test]
	async fn create_keeps_parameters() {
		let (service, store) = service();
		let mut req = request(SPACE_ID);
		req.parameters.insert("delay".to_string(), Value::from("5m"));

		service.create(INSTANCE_ID.into(), req).await.unwrap();

		let stored = store.get_instance(&INSTANCE_ID.into()).await.unwrap().unwrap();
		assert_eq!(stored.parameters.get("delay"), Some(&Value::from("5m")));
	}

	#[tokio::test]
	async fn create_already_exists_no_conflict() {
		let (service, store) = service();
		store.save_instance(&existing_instance()).await.unwrap();

		let outcome = service.create(INSTANCE_ID.into(), request(SPACE_ID)).await.unwrap();

		assert!(matches!(outcome, ProvisionOutcome::Existing { .. }));
		assert!(outcome.dashboard_url().ends_with(&format!("/dashboard/{INSTANCE_ID}")));
		assert_eq!(store.count_instances().await.unwrap(), 1);
	}

	#[tokio::test]
	async fn create_already_exists_conflict() {
		let (service, store) = service();
		store.save_instance(&existing_instance()).await.unwrap();

		let err = service
			.create(INSTANCE_ID.into(), request(ALTERNATE_ID))
			.await
			.unwrap_err();

		assert!(matches!(err, ProvisioningError::Conflict(ref id) if id.as_str() == INSTANCE_ID));
		let stored = store.get_instance(&INSTANCE_ID.into()).await.unwrap().unwrap();
		assert_eq!(stored.space_guid, SPACE_ID);
		assert_eq!(store.count_instances().await.unwrap(), 1);
	}

	#[tokio::test]
	async fn create_conflicts_on_different_organization() {
		let (service, store) = service();
		store.save_instance(&existing_instance()).await.unwrap();
		let mut req = request(SPACE_ID);
		req.organization_guid = ALTERNATE_ID.to_string();

		let err = service.create(INSTANCE_ID.into(), req).await.unwrap_err();
		assert!(matches!(err, ProvisioningError::Conflict(_)));
	}

	#[tokio::test]
	async fn update_succeeds_without_touching_state() {
		let (service, store) = service();

		service.update(&INSTANCE_ID.into(), "service").await.unwrap();
		assert_eq!(store.count_instances().await.unwrap(), 0);

		let saved = existing_instance();
		store.save_instance(&saved).await.unwrap();
		service.update(&INSTANCE_ID.into(), "service").await.unwrap();
		let stored = store.get_instance(&INSTANCE_ID.into()).await.unwrap().unwrap();
		assert_eq!(stored, saved);
	}

	#[tokio::test]
	async fn delete_removes_instance() {
		let (service, store) = service();
		store.save_instance(&existing_instance()).await.unwrap();

		service
			.delete(&INSTANCE_ID.into(), "service", "plan")
			.await
			.unwrap();
		assert_eq!(store.count_instances().await.unwrap(), 0);
	}

	#[tokio::test]
	async fn delete_missing_instance_is_gone() {
		let (service, store) = service();

		let err = service
			.delete(&INSTANCE_ID.into(), "service", "plan")
			.await
			.unwrap_err();

		assert!(matches!(err, ProvisioningError::Gone(_)));
		assert_eq!(store.count_instances().await.unwrap(), 0);
	}

	#[tokio::test]
	async fn fetch_returns_instance_or_gone() {
		let (service, store) = service();
		assert!(matches!(
			service.fetch(&INSTANCE_ID.into()).await,
			Err(ProvisioningError::Gone(_))
		));

		store.save_instance(&existing_instance()).await.unwrap();
		let instance = service.fetch(&INSTANCE_ID.into()).await.unwrap();
		assert_eq!(instance.organization_guid, ORGANIZATION_ID);
	}

	#[tokio::test]
	async fn store_failures_surface_as_database_errors() {
		let service = ProvisioningService::new(Arc::new(BrokenStore), DashboardUrls::new("https://x"));

		let err = service.create(INSTANCE_ID.into(), request(SPACE_ID)).await.unwrap_err();
		assert!(matches!(err, ProvisioningError::Database(_)));

		let err = service
			.delete(&INSTANCE_ID.into(), "service", "plan")
			.await
			.unwrap_err();
		assert!(matches!(err, ProvisioningError::Database(_)));
	}
}
