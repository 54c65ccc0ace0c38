use common_utils::types::{MajorUnit, ResourceId};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CartItem {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub product_id: Option<ResourceId>,
    pub quantity: u32,
    #[serde(default)]
    pub price: Option<MajorUnit>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddToCartRequest {
    pub product_id: ResourceId,
    pub quantity: u32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateCartItemRequest {
    pub quantity: u32,
}
