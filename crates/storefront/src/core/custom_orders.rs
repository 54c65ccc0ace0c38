use api_models::{
    custom_orders::{CustomOrder, CustomOrderForm},
    types::{ListResponse, MessageResponse},
};
use router_env::{instrument, tracing, Flow};

use crate::{
    core::{errors::StorefrontResult, forms},
    routes::AppState,
    services::{call_backend, BackendCall},
};

/// Submits a made-to-order request; the expected date may not lie before today
#[instrument(skip_all)]
pub async fn create(state: &AppState, form: &CustomOrderForm) -> StorefrontResult<MessageResponse> {
    state.session.require_token()?;
    let request = forms::validate_custom_order(form, common_utils::date_time::today())?;
    call_backend(
        state,
        Flow::CustomOrders,
        BackendCall::post("/custom-orders").json(request),
    )
    .await
}

pub async fn list(state: &AppState) -> StorefrontResult<Vec<CustomOrder>> {
    let custom_orders: ListResponse<CustomOrder> =
        call_backend(state, Flow::CustomOrders, BackendCall::get("/custom-orders")).await?;
    Ok(custom_orders.into_inner())
}
