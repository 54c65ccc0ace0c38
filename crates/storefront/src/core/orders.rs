use api_models::{
    orders::{CancelOrderRequest, CheckoutForm, Order},
    types::{ListResponse, MessageResponse},
};
use common_utils::types::ResourceId;
use router_env::{instrument, logger, tracing, Flow};

use crate::{
    core::{errors::StorefrontResult, forms},
    routes::AppState,
    services::{call_backend, BackendCall},
};

/// Places an order for the cart's contents. The form is validated before anything is sent.
#[instrument(skip_all)]
pub async fn place_order(state: &AppState, form: &CheckoutForm) -> StorefrontResult<MessageResponse> {
    state.session.require_token()?;
    let request = forms::validate_checkout(form)?;
    logger::info!(payment_method = %request.payment_method, "Placing order");
    call_backend(
        state,
        Flow::OrdersCreate,
        BackendCall::post("/orders").json(request),
    )
    .await
}

#[instrument(skip_all)]
pub async fn list(state: &AppState) -> StorefrontResult<Vec<Order>> {
    let orders: ListResponse<Order> =
        call_backend(state, Flow::OrdersRetrieve, BackendCall::get("/orders")).await?;
    Ok(orders.into_inner())
}

#[instrument(skip_all, fields(order_id = %order_id))]
pub async fn get(state: &AppState, order_id: &ResourceId) -> StorefrontResult<Order> {
    call_backend(
        state,
        Flow::OrdersRetrieve,
        BackendCall::get(format!("/orders/{order_id}")),
    )
    .await
}

#[instrument(skip_all, fields(order_id = %order_id))]
pub async fn cancel(
    state: &AppState,
    order_id: &ResourceId,
    reason: Option<String>,
) -> StorefrontResult<MessageResponse> {
    call_backend(
        state,
        Flow::OrdersCancel,
        BackendCall::post(format!("/orders/{order_id}/cancel")).json(CancelOrderRequest {
            reason: reason.filter(|reason| !reason.trim().is_empty()),
        }),
    )
    .await
}
