use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{merge, merge_opt, Entity, UniqueKey};
use crate::errors::ModelError;
use crate::status::Status;
use crate::validation::{check_price, check_stock, normalize_key, require_non_empty};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i64,
    pub supplier_id: String,
    #[serde(default)]
    pub status: Status,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i64,
    pub supplier_id: String,
    #[serde(default)]
    pub status: Status,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i64>,
    pub supplier_id: Option<String>,
    pub status: Option<Status>,
}

impl Entity for Product {
    type Input = NewProduct;
    type Patch = ProductPatch;
    type View = Product;

    const KIND: &'static str = "product";
    const COLLECTION: &'static str = "products";
    const FILE_NAME: &'static str = "products.json";

    fn id(&self) -> &str { &self.id }

    fn create(id: String, input: NewProduct) -> Result<Self, ModelError> {
        Ok(Self {
            id,
            name: input.name.trim().to_string(),
            description: input.description,
            price: input.price,
            stock_quantity: input.stock_quantity,
            supplier_id: input.supplier_id.trim().to_string(),
            status: input.status,
        })
    }

    fn apply(&mut self, patch: ProductPatch) -> Result<(), ModelError> {
        merge(&mut self.name, patch.name.map(|n| n.trim().to_string()));
        merge_opt(&mut self.description, patch.description);
        merge(&mut self.price, patch.price);
        merge(&mut self.stock_quantity, patch.stock_quantity);
        merge(&mut self.supplier_id, patch.supplier_id.map(|s| s.trim().to_string()));
        merge(&mut self.status, patch.status);
        Ok(())
    }

    fn validate(&self) -> Result<(), ModelError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("supplier_id", &self.supplier_id)?;
        check_price("price", self.price)?;
        check_stock("stock_quantity", self.stock_quantity)
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::composite(
            "supplier_id and name",
            [normalize_key(&self.supplier_id), normalize_key(&self.name)],
        )]
    }

    fn view(&self) -> Product { self.clone() }
}
