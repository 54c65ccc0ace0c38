use common_utils::types::{MajorUnit, ResourceId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: MajorUnit,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    /// Metal purity, e.g. `22K`
    #[serde(default)]
    pub purity: Option<String>,
    #[serde(default, alias = "weight")]
    pub weight_grams: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: Option<u32>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Collection {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Query string of `GET /products`
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}
