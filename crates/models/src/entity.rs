//! The contract every stored resource implements.
//!
//! A resource is created from an `Input` body, shallow-merged with a `Patch`
//! body on update, and rendered to clients through its `View`. Ids are assigned
//! by the store and never taken from request bodies.

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::ModelError;

/// A value (or tuple of values) that must not repeat across records of one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueKey {
    /// Human-readable description used in conflict messages, e.g. `"supplier_id and name"`.
    pub fields: &'static str,
    /// Normalized parts, compared element by element.
    pub parts: Vec<String>,
}

impl UniqueKey {
    pub fn new(fields: &'static str, value: impl Into<String>) -> Self {
        Self { fields, parts: vec![value.into()] }
    }

    pub fn composite<I, S>(fields: &'static str, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { fields, parts: parts.into_iter().map(Into::into).collect() }
    }
}

pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Input: DeserializeOwned + Send + 'static;
    type Patch: DeserializeOwned + Send + 'static;
    type View: Serialize + Send + 'static;

    /// Singular name used in messages and logs.
    const KIND: &'static str;
    /// Plural name used in routes and as the key of legacy wrapped files.
    const COLLECTION: &'static str;
    /// File name inside the data directory.
    const FILE_NAME: &'static str;

    /// Set when `prepare_input`/`prepare_patch` do CPU-heavy work (password hashing).
    const HEAVY_PREPARE: bool = false;

    fn id(&self) -> &str;

    /// Work done on a create body before the store lock is taken.
    fn prepare_input(input: Self::Input) -> Result<Self::Input, ModelError> {
        Ok(input)
    }

    /// Work done on a patch body before the store lock is taken.
    fn prepare_patch(patch: Self::Patch) -> Result<Self::Patch, ModelError> {
        Ok(patch)
    }

    /// Build a new record; may fail for derived fields (password hashing, defaults).
    fn create(id: String, input: Self::Input) -> Result<Self, ModelError>;

    /// Overwrite every field present in `patch`. The id is never touched.
    fn apply(&mut self, patch: Self::Patch) -> Result<(), ModelError>;

    /// Check the whole record; runs after `create` and after `apply`.
    fn validate(&self) -> Result<(), ModelError>;

    fn unique_keys(&self) -> Vec<UniqueKey> {
        Vec::new()
    }

    fn view(&self) -> Self::View;
}

/// Overwrite `target` when the patch carries a value.
pub(crate) fn merge<T>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

/// Same as [`merge`] for optional fields.
pub(crate) fn merge_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}
