use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Availability flag carried by users, products, stores, suppliers and campaigns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    On,
    Off,
}
