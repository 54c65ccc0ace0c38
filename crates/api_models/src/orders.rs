use common_utils::{
    custom_serde,
    pii::{self, PhoneNumberStrategy},
    types::{MajorUnit, ResourceId},
};
use masking::Secret;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::enums::{OrderStatus, PaymentMethod};

/// Delivery address as returned by the backend
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Address {
    pub name: String,
    #[serde(alias = "phone")]
    pub mobile: Secret<String, PhoneNumberStrategy>,
    #[serde(alias = "address_line1")]
    pub line1: String,
    #[serde(default, alias = "address_line2")]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct OrderItem {
    #[serde(default)]
    pub product_id: Option<ResourceId>,
    #[serde(default)]
    pub name: Option<String>,
    pub quantity: u32,
    pub price: MajorUnit,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(alias = "total", alias = "total_amount")]
    pub amount: MajorUnit,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub shipping_address: Option<Address>,
    #[serde(default, with = "custom_serde::date::option")]
    pub created_at: Option<Date>,
}

/// Body of `POST /orders`, built from a validated [`CheckoutForm`]
#[derive(Debug, Serialize)]
pub struct PlaceOrderRequest {
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

/// Address sent with a new order; the mobile number is validated
#[derive(Debug, Serialize)]
pub struct ShippingAddress {
    pub name: String,
    pub mobile: pii::PhoneNumber,
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// Checkout form as typed by the customer
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
