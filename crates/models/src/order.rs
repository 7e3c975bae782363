use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{merge, Entity};
use crate::errors::ModelError;
use crate::validation::{check_price, parse_datetime, require_non_empty, DATETIME_FORMAT};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub campaign_id: Option<String>,
    pub unit_price: f64,
}

/// A store's purchase. `total_amount` is derived from the items unless given.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: String,
    pub store_id: String,
    #[serde(alias = "item")]
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    #[serde(default)]
    pub status: OrderStatus,
    pub date: String,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewOrder {
    pub store_id: String,
    #[serde(alias = "item")]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct OrderPatch {
    pub store_id: Option<String>,
    #[serde(alias = "item")]
    pub items: Option<Vec<OrderItem>>,
    pub total_amount: Option<f64>,
    pub status: Option<OrderStatus>,
    pub date: Option<String>,
}

/// Sum of `quantity * unit_price`, rounded to cents.
pub fn items_total(items: &[OrderItem]) -> f64 {
    let raw: f64 = items.iter().map(|i| f64::from(i.quantity) * i.unit_price).sum();
    (raw * 100.0).round() / 100.0
}

impl Entity for Order {
    type Input = NewOrder;
    type Patch = OrderPatch;
    type View = Order;

    const KIND: &'static str = "order";
    const COLLECTION: &'static str = "orders";
    const FILE_NAME: &'static str = "orders.json";

    fn id(&self) -> &str { &self.id }

    fn create(id: String, input: NewOrder) -> Result<Self, ModelError> {
        let total_amount = input.total_amount.unwrap_or_else(|| items_total(&input.items));
        let date = input
            .date
            .map(|d| d.trim().to_string())
            .unwrap_or_else(|| Utc::now().format(DATETIME_FORMAT).to_string());
        Ok(Self {
            id,
            store_id: input.store_id.trim().to_string(),
            items: input.items,
            total_amount,
            status: input.status,
            date,
        })
    }

    fn apply(&mut self, patch: OrderPatch) -> Result<(), ModelError> {
        // New items without an explicit total re-derive it.
        if let (Some(items), None) = (&patch.items, patch.total_amount) {
            self.total_amount = items_total(items);
        }
        merge(&mut self.store_id, patch.store_id.map(|s| s.trim().to_string()));
        merge(&mut self.items, patch.items);
        merge(&mut self.total_amount, patch.total_amount);
        merge(&mut self.status, patch.status);
        merge(&mut self.date, patch.date.map(|d| d.trim().to_string()));
        Ok(())
    }

    fn validate(&self) -> Result<(), ModelError> {
        require_non_empty("store_id", &self.store_id)?;
        if self.items.is_empty() {
            return Err(ModelError::invalid("items must contain at least one item"));
        }
        for (idx, item) in self.items.iter().enumerate() {
            require_non_empty(&format!("items[{idx}].product_id"), &item.product_id)?;
            if item.quantity == 0 {
                return Err(ModelError::invalid(format!("items[{idx}].quantity must be at least 1")));
            }
            check_price(&format!("items[{idx}].unit_price"), item.unit_price)?;
        }
        check_price("total_amount", self.total_amount)?;
        parse_datetime("date", &self.date)?;
        Ok(())
    }

    fn view(&self) -> Order { self.clone() }
}
