use std::{path::PathBuf, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::{debug, error, warn};

use crate::errors::ServiceError;

/// Generic JSON file-backed record list.
///
/// Holds a `Vec<T>` in memory and rewrites the whole file as a pretty-printed
/// JSON array after every mutation. Writers are serialized by the lock, and the
/// in-memory list only changes once the file write went through.
pub struct JsonArrayStore<T> {
    inner: RwLock<Vec<T>>,
    file_path: PathBuf,
    collection: &'static str,
}

impl<T> JsonArrayStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Load the store from a path. Creates the file holding `[]` if missing.
    ///
    /// Files wrapped as `{"<collection>": [...]}` are accepted and rewritten as a
    /// plain array on the next mutation. Unparseable files are an error rather
    /// than being replaced.
    pub async fn open<P: Into<PathBuf>>(path: P, collection: &'static str) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
            }
        }

        let items: Vec<T> = match fs::read(&file_path).await {
            Ok(bytes) => parse_items(&bytes, collection).map_err(|e| {
                ServiceError::Storage(format!("{}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %file_path.display(), collection, "data file missing; creating empty one");
                write_pretty::<T>(&file_path, &[]).await?;
                Vec::new()
            }
            Err(e) => return Err(ServiceError::storage(e)),
        };

        debug!(path = %file_path.display(), collection, count = items.len(), "store loaded");
        Ok(Arc::new(Self { inner: RwLock::new(items), file_path, collection }))
    }

    pub fn path(&self) -> &std::path::Path { &self.file_path }

    /// Snapshot of all records.
    pub async fn list(&self) -> Vec<T> {
        self.inner.read().await.clone()
    }

    /// First record matching the predicate.
    pub async fn find<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.inner.read().await.iter().find(|t| pred(t)).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Apply a mutation to a copy of the list and persist it.
    ///
    /// If `f` fails nothing is written; if the write fails the in-memory list is
    /// left as it was.
    pub async fn mutate<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let mut guard = self.inner.write().await;
        let mut next = guard.clone();
        let out = f(&mut next)?;
        if let Err(e) = write_pretty(&self.file_path, &next).await {
            common::metrics::record_failure(self.collection);
            error!(path = %self.file_path.display(), collection = self.collection, error = %e, "persist failed");
            return Err(e);
        }
        *guard = next;
        Ok(out)
    }
}

fn parse_items<T: DeserializeOwned>(bytes: &[u8], collection: &str) -> Result<Vec<T>, serde_json::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    match value {
        serde_json::Value::Object(mut map) if map.contains_key(collection) => {
            let inner = map.remove(collection).unwrap_or_default();
            serde_json::from_value(inner)
        }
        other => serde_json::from_value(other),
    }
}

/// Write to a sibling temp file and rename over the target.
async fn write_pretty<T: Serialize>(path: &std::path::Path, items: &[T]) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(items).map_err(ServiceError::storage)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, data).await.map_err(ServiceError::storage)?;
    fs::rename(&tmp, path).await.map_err(ServiceError::storage)?;
    Ok(())
}
