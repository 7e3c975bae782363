use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{merge, Entity, UniqueKey};
use crate::errors::ModelError;
use crate::status::Status;
use crate::validation::{check_percentage, normalize_key, parse_date, require_non_empty};

/// A time-boxed discount a supplier offers. Dates are `YYYY-MM-DD`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Campaign {
    pub id: String,
    pub supplier_id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub discount_percentage: f64,
    #[serde(default)]
    pub status: Status,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewCampaign {
    pub supplier_id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub discount_percentage: f64,
    #[serde(default)]
    pub status: Status,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct CampaignPatch {
    pub supplier_id: Option<String>,
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub discount_percentage: Option<f64>,
    pub status: Option<Status>,
}

impl Entity for Campaign {
    type Input = NewCampaign;
    type Patch = CampaignPatch;
    type View = Campaign;

    const KIND: &'static str = "campaign";
    const COLLECTION: &'static str = "campaigns";
    const FILE_NAME: &'static str = "campaign.json";

    fn id(&self) -> &str { &self.id }

    fn create(id: String, input: NewCampaign) -> Result<Self, ModelError> {
        Ok(Self {
            id,
            supplier_id: input.supplier_id.trim().to_string(),
            name: input.name.trim().to_string(),
            start_date: input.start_date.trim().to_string(),
            end_date: input.end_date.trim().to_string(),
            discount_percentage: input.discount_percentage,
            status: input.status,
        })
    }

    fn apply(&mut self, patch: CampaignPatch) -> Result<(), ModelError> {
        merge(&mut self.supplier_id, patch.supplier_id.map(|s| s.trim().to_string()));
        merge(&mut self.name, patch.name.map(|n| n.trim().to_string()));
        merge(&mut self.start_date, patch.start_date.map(|d| d.trim().to_string()));
        merge(&mut self.end_date, patch.end_date.map(|d| d.trim().to_string()));
        merge(&mut self.discount_percentage, patch.discount_percentage);
        merge(&mut self.status, patch.status);
        Ok(())
    }

    fn validate(&self) -> Result<(), ModelError> {
        require_non_empty("supplier_id", &self.supplier_id)?;
        require_non_empty("name", &self.name)?;
        let start = parse_date("start_date", &self.start_date)?;
        let end = parse_date("end_date", &self.end_date)?;
        if end < start {
            return Err(ModelError::invalid("end_date must not be before start_date"));
        }
        check_percentage("discount_percentage", self.discount_percentage)
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::composite(
            "supplier_id and name",
            [normalize_key(&self.supplier_id), normalize_key(&self.name)],
        )]
    }

    fn view(&self) -> Campaign { self.clone() }
}
