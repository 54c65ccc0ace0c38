use common_utils::{
    custom_serde, pii,
    types::{MajorUnit, ResourceId},
};
use serde::{Deserialize, Serialize};
use time::Date;

/// A made-to-order jewelry request
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CustomOrder {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(alias = "type", alias = "category")]
    pub jewelry_type: String,
    pub description: String,
    #[serde(default)]
    pub budget: Option<MajorUnit>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, with = "custom_serde::date::option")]
    pub expected_date: Option<Date>,
    #[serde(default, with = "custom_serde::date::option")]
    pub created_at: Option<Date>,
}

/// Body of `POST /custom-orders`
#[derive(Debug, Serialize)]
pub struct CustomOrderRequest {
    pub name: String,
    pub mobile: pii::PhoneNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<pii::Email>,
    pub jewelry_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<MajorUnit>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "custom_serde::date::option"
    )]
    pub expected_date: Option<Date>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reference_images: Vec<String>,
}

/// Custom order form as typed by the customer
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CustomOrderForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub jewelry_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub expected_date: Option<String>,
    #[serde(default)]
    pub reference_images: Vec<String>,
}
