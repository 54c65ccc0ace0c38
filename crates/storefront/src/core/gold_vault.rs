use api_models::{
    gold_vault::{GoldVault, GoldVaultEntry},
    types::ListResponse,
};
use router_env::{instrument, tracing, Flow};

use crate::{
    core::errors::StorefrontResult,
    routes::AppState,
    services::{call_backend, BackendCall},
};

#[instrument(skip_all)]
pub async fn summary(state: &AppState) -> StorefrontResult<GoldVault> {
    call_backend(state, Flow::GoldVault, BackendCall::get("/gold-vault")).await
}

#[instrument(skip_all)]
pub async fn entries(state: &AppState) -> StorefrontResult<Vec<GoldVaultEntry>> {
    let entries: ListResponse<GoldVaultEntry> =
        call_backend(state, Flow::GoldVault, BackendCall::get("/gold-vault/entries")).await?;
    Ok(entries.into_inner())
}
