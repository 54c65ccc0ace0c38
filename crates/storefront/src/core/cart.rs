use api_models::{
    cart::{AddToCartRequest, CartItem, UpdateCartItemRequest},
    types::{CountResponse, ListResponse, MessageResponse},
};
use common_utils::types::ResourceId;
use error_stack::report;
use router_env::{instrument, logger, tracing, Flow};

use crate::{
    core::{
        errors::{StorefrontError, StorefrontResult},
        wishlist,
    },
    routes::AppState,
    services::{call_backend, BackendCall},
};

#[instrument(skip_all)]
pub async fn list(state: &AppState) -> StorefrontResult<Vec<CartItem>> {
    let items: ListResponse<CartItem> =
        call_backend(state, Flow::Cart, BackendCall::get("/cart")).await?;
    Ok(items.into_inner())
}

#[instrument(skip_all, fields(product_id = %product_id, quantity = quantity))]
pub async fn add(
    state: &AppState,
    product_id: ResourceId,
    quantity: u32,
) -> StorefrontResult<MessageResponse> {
    check_quantity(quantity)?;
    call_backend(
        state,
        Flow::Cart,
        BackendCall::post("/cart").json(AddToCartRequest {
            product_id,
            quantity,
        }),
    )
    .await
}

#[instrument(skip_all, fields(item_id = %item_id, quantity = quantity))]
pub async fn update_quantity(
    state: &AppState,
    item_id: &ResourceId,
    quantity: u32,
) -> StorefrontResult<MessageResponse> {
    check_quantity(quantity)?;
    call_backend(
        state,
        Flow::Cart,
        BackendCall::put(format!("/cart/{item_id}")).json(UpdateCartItemRequest { quantity }),
    )
    .await
}

pub async fn remove(state: &AppState, item_id: &ResourceId) -> StorefrontResult<MessageResponse> {
    call_backend(state, Flow::Cart, BackendCall::delete(format!("/cart/{item_id}"))).await
}

pub async fn count(state: &AppState) -> StorefrontResult<u64> {
    let count: CountResponse =
        call_backend(state, Flow::Cart, BackendCall::get("/cart/count")).await?;
    Ok(count.count)
}

fn check_quantity(quantity: u32) -> StorefrontResult<()> {
    if quantity == 0 {
        return Err(report!(StorefrontError::Validation {
            message: "Quantity must be at least 1".to_string(),
        }));
    }
    Ok(())
}

/// Badge counts shown in the header
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderCounts {
    pub cart: Option<u64>,
    pub wishlist: Option<u64>,
}

/// Fetches the cart and wishlist counts concurrently. A count that fails to load is left
/// empty without discarding the other one.
#[instrument(skip_all)]
pub async fn header_counts(state: &AppState) -> HeaderCounts {
    if !state.session.is_authenticated() {
        return HeaderCounts::default();
    }

    let (cart, wishlist) = tokio::join!(count(state), wishlist::count(state));
    let settle = |name: &str, result: StorefrontResult<u64>| match result {
        Ok(count) => Some(count),
        Err(error) => {
            logger::warn!(count = name, error = ?error, "Unable to load header count");
            None
        }
    };

    HeaderCounts {
        cart: settle("cart", cart),
        wishlist: settle("wishlist", wishlist),
    }
}
