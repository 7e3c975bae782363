use std::{marker::PhantomData, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::{id::generate_id, Entity, UniqueKey};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::resource::store::ResourceStore;
use crate::storage::json_array_store::JsonArrayStore;

/// File-backed resource store: one JSON array file per entity type.
pub struct JsonResourceStore<E: Entity> {
    store: Arc<JsonArrayStore<E>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> JsonResourceStore<E> {
    /// Open (or create) `<data_dir>/<E::FILE_NAME>`.
    pub async fn open_in(data_dir: &str) -> Result<Arc<Self>, ServiceError> {
        Self::open(common::env::data_file(data_dir, E::FILE_NAME)).await
    }

    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonArrayStore::<E>::open(path, E::COLLECTION).await?;
        Ok(Arc::new(Self { store, _entity: PhantomData }))
    }

    pub fn path(&self) -> &std::path::Path { self.store.path() }
}

/// Reject `candidate` if another record (not at `skip`) shares one of its keys.
fn ensure_unique<E: Entity>(items: &[E], candidate: &E, skip: Option<usize>) -> Result<(), ServiceError> {
    let keys = candidate.unique_keys();
    if keys.is_empty() {
        return Ok(());
    }
    for (idx, other) in items.iter().enumerate() {
        if Some(idx) == skip {
            continue;
        }
        let other_keys = other.unique_keys();
        if let Some(UniqueKey { fields, .. }) = keys.iter().find(|k| other_keys.contains(k)) {
            return Err(ServiceError::Conflict(format!(
                "{} with this {} already exists",
                E::KIND,
                fields
            )));
        }
    }
    Ok(())
}

/// Run `f` on the blocking pool when the entity's preparation is CPU-heavy.
async fn prepare<E, T, F>(value: T, f: F) -> Result<T, ServiceError>
where
    E: Entity,
    T: Send + 'static,
    F: FnOnce(T) -> Result<T, models::errors::ModelError> + Send + 'static,
{
    if !E::HEAVY_PREPARE {
        return Ok(f(value)?);
    }
    let prepared = tokio::task::spawn_blocking(move || f(value))
        .await
        .map_err(ServiceError::storage)??;
    Ok(prepared)
}

fn fresh_id<E: Entity>(items: &[E]) -> String {
    loop {
        let id = generate_id();
        if !items.iter().any(|r| r.id() == id) {
            return id;
        }
    }
}

#[async_trait]
impl<E: Entity> ResourceStore<E> for JsonResourceStore<E> {
    async fn list(&self, page: Option<Pagination>) -> Vec<E> {
        let all = self.store.list().await;
        match page {
            Some(p) => p.apply(all),
            None => all,
        }
    }

    async fn get(&self, id: &str) -> Result<E, ServiceError> {
        self.store
            .find(|r| r.id() == id)
            .await
            .ok_or_else(|| ServiceError::not_found(E::KIND))
    }

    #[instrument(skip_all, fields(resource = E::COLLECTION))]
    async fn create(&self, input: E::Input) -> Result<E, ServiceError> {
        let input = prepare::<E, _, _>(input, E::prepare_input).await?;
        let created = self
            .store
            .mutate(move |items| {
                let record = E::create(fresh_id(items), input)?;
                record.validate()?;
                ensure_unique(items, &record, None)?;
                items.push(record.clone());
                Ok(record)
            })
            .await?;
        common::metrics::record_mutation(E::COLLECTION, "create");
        info!(id = %created.id(), "created");
        Ok(created)
    }

    #[instrument(skip(self, patch), fields(resource = E::COLLECTION))]
    async fn update(&self, id: &str, patch: E::Patch) -> Result<E, ServiceError> {
        let patch = prepare::<E, _, _>(patch, E::prepare_patch).await?;
        let updated = self
            .store
            .mutate(move |items| {
                let idx = items
                    .iter()
                    .position(|r| r.id() == id)
                    .ok_or_else(|| ServiceError::not_found(E::KIND))?;
                let mut record = items[idx].clone();
                record.apply(patch)?;
                record.validate()?;
                ensure_unique(items, &record, Some(idx))?;
                items[idx] = record.clone();
                Ok(record)
            })
            .await?;
        common::metrics::record_mutation(E::COLLECTION, "update");
        info!("updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(resource = E::COLLECTION))]
    async fn delete(&self, id: &str) -> Result<E, ServiceError> {
        let removed = self
            .store
            .mutate(|items| {
                let idx = items
                    .iter()
                    .position(|r| r.id() == id)
                    .ok_or_else(|| ServiceError::not_found(E::KIND))?;
                Ok(items.remove(idx))
            })
            .await?;
        common::metrics::record_mutation(E::COLLECTION, "delete");
        info!("deleted");
        Ok(removed)
    }
}
