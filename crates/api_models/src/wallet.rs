use common_utils::{
    custom_serde,
    types::{MajorUnit, ResourceId},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::enums::TransactionType;

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Wallet {
    #[serde(default)]
    pub balance: MajorUnit,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct WalletTransaction {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default, alias = "type")]
    pub kind: TransactionType,
    pub amount: MajorUnit,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "custom_serde::date::option")]
    pub created_at: Option<Date>,
}
