//! Back office resources.

use common_utils::{
    custom_serde,
    types::{MajorUnit, ResourceId},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::enums::{DiscountType, OrderStatus};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Coupon {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(flatten)]
    pub details: CouponRequest,
}

/// Body of coupon create and update
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CouponRequest {
    pub code: String,
    #[serde(default)]
    pub discount_type: DiscountType,
    pub discount_value: MajorUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order_amount: Option<MajorUnit>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "custom_serde::date::option"
    )]
    pub valid_from: Option<Date>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "custom_serde::date::option"
    )]
    pub valid_until: Option<Date>,
    #[serde(default = "default_active", alias = "is_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Banner {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(flatten)]
    pub details: BannerRequest,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct BannerRequest {
    pub title: String,
    #[serde(alias = "image")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default = "default_active", alias = "is_active")]
    pub active: bool,
}

/// Query string of `GET /admin/reports/summary`
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportQuery {
    #[serde(with = "custom_serde::date")]
    pub from: Date,
    #[serde(with = "custom_serde::date")]
    pub to: Date,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ReportSummary {
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub total_revenue: MajorUnit,
    #[serde(default)]
    pub new_customers: u64,
    #[serde(default)]
    pub active_schemes: u64,
    #[serde(default)]
    pub scheme_collections: MajorUnit,
}
