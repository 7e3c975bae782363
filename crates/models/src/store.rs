use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{merge, merge_opt, Entity, UniqueKey};
use crate::errors::ModelError;
use crate::status::Status;
use crate::validation::{
    check_cnpj, check_email, check_phone, cnpj_digits, normalize_key, require_non_empty,
};

/// A buying store (loja) registered in the hub.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Store {
    pub id: String,
    pub store_name: String,
    pub cnpj: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub contact_email: String,
    #[serde(default)]
    pub status: Status,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewStore {
    pub store_name: String,
    pub cnpj: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub contact_email: String,
    #[serde(default)]
    pub status: Status,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct StorePatch {
    pub store_name: Option<String>,
    pub cnpj: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub contact_email: Option<String>,
    pub status: Option<Status>,
}

impl Entity for Store {
    type Input = NewStore;
    type Patch = StorePatch;
    type View = Store;

    const KIND: &'static str = "store";
    const COLLECTION: &'static str = "stores";
    const FILE_NAME: &'static str = "store.json";

    fn id(&self) -> &str { &self.id }

    fn create(id: String, input: NewStore) -> Result<Self, ModelError> {
        Ok(Self {
            id,
            store_name: input.store_name.trim().to_string(),
            cnpj: input.cnpj.trim().to_string(),
            address: input.address,
            phone_number: input.phone_number,
            contact_email: input.contact_email.trim().to_string(),
            status: input.status,
        })
    }

    fn apply(&mut self, patch: StorePatch) -> Result<(), ModelError> {
        merge(&mut self.store_name, patch.store_name.map(|n| n.trim().to_string()));
        merge(&mut self.cnpj, patch.cnpj.map(|c| c.trim().to_string()));
        merge_opt(&mut self.address, patch.address);
        merge_opt(&mut self.phone_number, patch.phone_number);
        merge(&mut self.contact_email, patch.contact_email.map(|e| e.trim().to_string()));
        merge(&mut self.status, patch.status);
        Ok(())
    }

    fn validate(&self) -> Result<(), ModelError> {
        require_non_empty("store_name", &self.store_name)?;
        check_cnpj("cnpj", &self.cnpj)?;
        check_email("contact_email", &self.contact_email)?;
        check_phone("phone_number", self.phone_number.as_deref())
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![
            UniqueKey::new("store_name", normalize_key(&self.store_name)),
            UniqueKey::new("cnpj", cnpj_digits(&self.cnpj)),
        ]
    }

    fn view(&self) -> Store { self.clone() }
}
