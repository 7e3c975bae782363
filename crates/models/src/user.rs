use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{merge, merge_opt, Entity, UniqueKey};
use crate::errors::ModelError;
use crate::password::hash_password;
use crate::status::Status;
use crate::validation::{check_email, normalize_key, require_non_empty};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Buyer,
    Supplier,
    Store,
}

/// Stored form. `pwd` holds the Argon2 PHC string, never the plaintext.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub pwd: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub pwd: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub store_id: Option<String>,
    /// Filled by `prepare_input` so the hash is computed outside the store lock.
    #[serde(skip)]
    pub pwd_hash: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub pwd: Option<String>,
    pub role: Option<Role>,
    pub status: Option<Status>,
    pub store_id: Option<String>,
    #[serde(skip)]
    pub pwd_hash: Option<String>,
}

/// What clients get back: everything but the password hash.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    require_non_empty("name", name)
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    check_email("email", email)
}

fn hash_checked(pwd: &str) -> Result<String, ModelError> {
    require_non_empty("pwd", pwd)?;
    hash_password(pwd)
}

impl Entity for User {
    type Input = NewUser;
    type Patch = UserPatch;
    type View = UserView;

    const KIND: &'static str = "user";
    const COLLECTION: &'static str = "users";
    const FILE_NAME: &'static str = "users.json";
    const HEAVY_PREPARE: bool = true;

    fn id(&self) -> &str { &self.id }

    fn prepare_input(mut input: NewUser) -> Result<NewUser, ModelError> {
        // Cheap checks first so a bad body doesn't pay for a hash.
        validate_name(&input.name)?;
        validate_email(&input.email)?;
        input.pwd_hash = Some(hash_checked(&input.pwd)?);
        input.pwd.clear();
        Ok(input)
    }

    fn prepare_patch(mut patch: UserPatch) -> Result<UserPatch, ModelError> {
        if let Some(pwd) = patch.pwd.take() {
            patch.pwd_hash = Some(hash_checked(&pwd)?);
        }
        Ok(patch)
    }

    fn create(id: String, input: NewUser) -> Result<Self, ModelError> {
        let input = if input.pwd_hash.is_some() { input } else { Self::prepare_input(input)? };
        let pwd = input.pwd_hash.unwrap_or_default();
        Ok(Self {
            id,
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            pwd,
            role: input.role,
            status: input.status,
            store_id: input.store_id,
        })
    }

    fn apply(&mut self, patch: UserPatch) -> Result<(), ModelError> {
        if let Some(pwd) = patch.pwd {
            self.pwd = hash_checked(&pwd)?;
        }
        merge(&mut self.pwd, patch.pwd_hash);
        merge(&mut self.name, patch.name.map(|n| n.trim().to_string()));
        merge(&mut self.email, patch.email.map(|e| e.trim().to_string()));
        merge(&mut self.role, patch.role);
        merge(&mut self.status, patch.status);
        merge_opt(&mut self.store_id, patch.store_id);
        Ok(())
    }

    fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        require_non_empty("pwd", &self.pwd)
    }

    /// Email is unique within the scope of one store.
    fn unique_keys(&self) -> Vec<UniqueKey> {
        let scope = self.store_id.as_deref().map(normalize_key).unwrap_or_default();
        vec![UniqueKey::composite("email", [scope, normalize_key(&self.email)])]
    }

    fn view(&self) -> UserView {
        UserView {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            status: self.status,
            store_id: self.store_id.clone(),
        }
    }
}
