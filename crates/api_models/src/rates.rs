use common_utils::types::MajorUnit;
use serde::{Deserialize, Serialize};

/// Price of one gram of a metal at a given purity
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct GoldRate {
    /// e.g. `gold` or `silver`
    #[serde(default)]
    pub metal: Option<String>,
    /// e.g. `22K`
    #[serde(alias = "karat")]
    pub purity: String,
    #[serde(alias = "rate", alias = "price_per_gram")]
    pub rate_per_gram: MajorUnit,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `PUT /admin/rates`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateRatesRequest {
    pub rates: Vec<GoldRate>,
}
