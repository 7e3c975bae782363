//! Resource stores for every entity the hub exposes.

pub mod json;
pub mod store;

use std::sync::Arc;

use models::{
    campaign::Campaign, order::Order, product::Product, store::Store, supplier::Supplier,
    user::User,
};
use tracing::info;

use crate::errors::ServiceError;
use json::JsonResourceStore;
use store::ResourceStore;

/// One store per resource, shared by the HTTP handlers.
#[derive(Clone)]
pub struct Resources {
    pub users: Arc<dyn ResourceStore<User>>,
    pub products: Arc<dyn ResourceStore<Product>>,
    pub orders: Arc<dyn ResourceStore<Order>>,
    pub stores: Arc<dyn ResourceStore<Store>>,
    pub suppliers: Arc<dyn ResourceStore<Supplier>>,
    pub campaigns: Arc<dyn ResourceStore<Campaign>>,
}

impl Resources {
    /// Open every resource file inside `data_dir`, creating missing ones.
    pub async fn open(data_dir: &str) -> Result<Self, ServiceError> {
        let resources = Self {
            users: JsonResourceStore::<User>::open_in(data_dir).await?,
            products: JsonResourceStore::<Product>::open_in(data_dir).await?,
            orders: JsonResourceStore::<Order>::open_in(data_dir).await?,
            stores: JsonResourceStore::<Store>::open_in(data_dir).await?,
            suppliers: JsonResourceStore::<Supplier>::open_in(data_dir).await?,
            campaigns: JsonResourceStore::<Campaign>::open_in(data_dir).await?,
        };
        info!(%data_dir, "resource stores opened");
        Ok(resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_one_file_per_resource() -> Result<(), anyhow::Error> {
        let dir = tempfile::tempdir()?;
        let data_dir = dir.path().to_string_lossy().to_string();
        let resources = Resources::open(&data_dir).await?;
        for file in ["users.json", "products.json", "orders.json", "store.json", "supplier.json", "campaign.json"] {
            assert!(dir.path().join(file).is_file(), "{file} missing");
        }
        assert!(resources.orders.list(None).await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn picks_up_existing_wrapped_store_file() -> Result<(), anyhow::Error> {
        let dir = tempfile::tempdir()?;
        tokio::fs::write(
            dir.path().join("store.json"),
            r#"{"stores": [{"id": "st001", "store_name": "Bingo Heeler", "cnpj": "12.345.678/0001-90", "contact_email": "down@bingo.com"}]}"#,
        )
        .await?;
        let data_dir = dir.path().to_string_lossy().to_string();
        let resources = Resources::open(&data_dir).await?;
        let store = resources.stores.get("st001").await?;
        assert_eq!(store.store_name, "Bingo Heeler");
        Ok(())
    }
}
