use common_utils::types::ResourceId;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct WishlistItem {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub product_id: Option<ResourceId>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddToWishlistRequest {
    pub product_id: ResourceId,
}
