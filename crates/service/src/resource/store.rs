use async_trait::async_trait;
use models::Entity;

use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// CRUD contract for one resource type.
/// Implementations own id assignment, validation and uniqueness checks.
#[async_trait]
pub trait ResourceStore<E: Entity>: Send + Sync {
    async fn list(&self, page: Option<Pagination>) -> Vec<E>;
    async fn get(&self, id: &str) -> Result<E, ServiceError>;
    async fn create(&self, input: E::Input) -> Result<E, ServiceError>;
    /// Shallow merge: fields present in `patch` overwrite, the id is kept.
    async fn update(&self, id: &str, patch: E::Patch) -> Result<E, ServiceError>;
    /// Returns the removed record.
    async fn delete(&self, id: &str) -> Result<E, ServiceError>;
}
