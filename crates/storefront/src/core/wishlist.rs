use api_models::{
    types::{CountResponse, ListResponse, MessageResponse},
    wishlist::{AddToWishlistRequest, WishlistItem},
};
use common_utils::types::ResourceId;
use router_env::{instrument, tracing, Flow};

use crate::{
    core::errors::StorefrontResult,
    routes::AppState,
    services::{call_backend, BackendCall},
};

#[instrument(skip_all)]
pub async fn list(state: &AppState) -> StorefrontResult<Vec<WishlistItem>> {
    let items: ListResponse<WishlistItem> =
        call_backend(state, Flow::Wishlist, BackendCall::get("/wishlist")).await?;
    Ok(items.into_inner())
}

pub async fn add(state: &AppState, product_id: ResourceId) -> StorefrontResult<MessageResponse> {
    call_backend(
        state,
        Flow::Wishlist,
        BackendCall::post("/wishlist").json(AddToWishlistRequest { product_id }),
    )
    .await
}

pub async fn remove(state: &AppState, item_id: &ResourceId) -> StorefrontResult<MessageResponse> {
    call_backend(
        state,
        Flow::Wishlist,
        BackendCall::delete(format!("/wishlist/{item_id}")),
    )
    .await
}

pub async fn count(state: &AppState) -> StorefrontResult<u64> {
    let count: CountResponse =
        call_backend(state, Flow::Wishlist, BackendCall::get("/wishlist/count")).await?;
    Ok(count.count)
}
