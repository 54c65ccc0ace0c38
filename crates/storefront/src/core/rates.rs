use api_models::{rates::GoldRate, types::ListResponse};
use router_env::{instrument, tracing, Flow};

use crate::{
    core::errors::StorefrontResult,
    routes::AppState,
    services::{call_backend, AuthRequirement, BackendCall},
};

/// Today's gold and silver rates; available without signing in
#[instrument(skip_all)]
pub async fn current(state: &AppState) -> StorefrontResult<Vec<GoldRate>> {
    let rates: ListResponse<GoldRate> = call_backend(
        state,
        Flow::GoldRatesRetrieve,
        BackendCall::get("/rates").auth(AuthRequirement::None),
    )
    .await?;
    Ok(rates.into_inner())
}
