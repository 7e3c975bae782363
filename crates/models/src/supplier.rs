use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{merge, merge_opt, Entity, UniqueKey};
use crate::errors::ModelError;
use crate::status::Status;
use crate::validation::{check_email, check_phone, normalize_key, require_non_empty};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Supplier {
    pub id: String,
    pub supplier_name: String,
    /// Free text, e.g. `"Informatica, Seguranca"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_category: Option<String>,
    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub status: Status,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewSupplier {
    pub supplier_name: String,
    #[serde(default)]
    pub supplier_category: Option<String>,
    pub contact_email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub status: Status,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct SupplierPatch {
    pub supplier_name: Option<String>,
    pub supplier_category: Option<String>,
    pub contact_email: Option<String>,
    pub phone_number: Option<String>,
    pub status: Option<Status>,
}

impl Entity for Supplier {
    type Input = NewSupplier;
    type Patch = SupplierPatch;
    type View = Supplier;

    const KIND: &'static str = "supplier";
    const COLLECTION: &'static str = "suppliers";
    const FILE_NAME: &'static str = "supplier.json";

    fn id(&self) -> &str { &self.id }

    fn create(id: String, input: NewSupplier) -> Result<Self, ModelError> {
        Ok(Self {
            id,
            supplier_name: input.supplier_name.trim().to_string(),
            supplier_category: input.supplier_category,
            contact_email: input.contact_email.trim().to_string(),
            phone_number: input.phone_number,
            status: input.status,
        })
    }

    fn apply(&mut self, patch: SupplierPatch) -> Result<(), ModelError> {
        merge(&mut self.supplier_name, patch.supplier_name.map(|n| n.trim().to_string()));
        merge_opt(&mut self.supplier_category, patch.supplier_category);
        merge(&mut self.contact_email, patch.contact_email.map(|e| e.trim().to_string()));
        merge_opt(&mut self.phone_number, patch.phone_number);
        merge(&mut self.status, patch.status);
        Ok(())
    }

    fn validate(&self) -> Result<(), ModelError> {
        require_non_empty("supplier_name", &self.supplier_name)?;
        check_email("contact_email", &self.contact_email)?;
        check_phone("phone_number", self.phone_number.as_deref())
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![
            UniqueKey::new("supplier_name", normalize_key(&self.supplier_name)),
            UniqueKey::new("contact_email", normalize_key(&self.contact_email)),
        ]
    }

    fn view(&self) -> Supplier { self.clone() }
}
