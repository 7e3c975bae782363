//! Generic CRUD handlers, instantiated once per resource type.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use models::Entity;
use serde::{Deserialize, Serialize};
use service::{pagination::Pagination, resource::store::ResourceStore};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiQuery};

pub type StoreState<E> = Arc<dyn ResourceStore<E>>;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page; the whole list is returned when neither value is given
    pub page: Option<u32>,
    /// Page size, clamped to 1..=100
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub message: String,
    pub id: String,
}

pub async fn list<E: Entity>(
    State(store): State<StoreState<E>>,
    ApiQuery(q): ApiQuery<ListQuery>,
) -> Json<Vec<E::View>> {
    let page = Pagination::from_query(q.page, q.per_page);
    let items = store.list(page).await;
    Json(items.iter().map(|r| r.view()).collect())
}

pub async fn get_one<E: Entity>(
    State(store): State<StoreState<E>>,
    Path(id): Path<String>,
) -> Result<Json<E::View>, JsonApiError> {
    let record = store.get(&id).await?;
    Ok(Json(record.view()))
}

pub async fn create<E: Entity>(
    State(store): State<StoreState<E>>,
    ApiJson(input): ApiJson<E::Input>,
) -> Result<(StatusCode, Json<E::View>), JsonApiError> {
    let record = store.create(input).await?;
    Ok((StatusCode::CREATED, Json(record.view())))
}

pub async fn update<E: Entity>(
    State(store): State<StoreState<E>>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<E::Patch>,
) -> Result<Json<E::View>, JsonApiError> {
    let record = store.update(&id, patch).await?;
    Ok(Json(record.view()))
}

pub async fn delete<E: Entity>(
    State(store): State<StoreState<E>>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, JsonApiError> {
    let removed = store.delete(&id).await?;
    info!(resource = E::COLLECTION, id = %removed.id(), "record removed via api");
    Ok(Json(DeletedResponse {
        message: format!("{} deleted", E::KIND),
        id: removed.id().to_string(),
    }))
}

/// `GET|POST /` and `GET|PUT|DELETE /:id` for one resource; nest under `/<collection>`.
pub fn router<E: Entity>(store: StoreState<E>) -> Router {
    Router::new()
        .route("/", get(list::<E>).post(create::<E>))
        .route("/:id", get(get_one::<E>).put(update::<E>).delete(delete::<E>))
        .with_state(store)
}
