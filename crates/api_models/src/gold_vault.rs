use common_utils::{
    custom_serde,
    types::{MajorUnit, ResourceId},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::enums::TransactionType;

/// Digital gold held on the customer's behalf
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct GoldVault {
    #[serde(default, alias = "total_gold_grams", alias = "grams")]
    pub total_grams: Decimal,
    #[serde(default)]
    pub invested_amount: MajorUnit,
    #[serde(default)]
    pub current_value: MajorUnit,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct GoldVaultEntry {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default, alias = "type")]
    pub kind: TransactionType,
    pub grams: Decimal,
    #[serde(default)]
    pub rate_per_gram: Option<MajorUnit>,
    pub amount: MajorUnit,
    #[serde(default, with = "custom_serde::date::option")]
    pub created_at: Option<Date>,
}
