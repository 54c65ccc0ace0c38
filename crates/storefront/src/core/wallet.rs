use api_models::{
    types::ListResponse,
    wallet::{Wallet, WalletTransaction},
};
use router_env::{instrument, tracing, Flow};

use crate::{
    core::errors::StorefrontResult,
    routes::AppState,
    services::{call_backend, BackendCall},
};

#[instrument(skip_all)]
pub async fn balance(state: &AppState) -> StorefrontResult<Wallet> {
    call_backend(state, Flow::Wallet, BackendCall::get("/wallet")).await
}

#[instrument(skip_all)]
pub async fn transactions(state: &AppState) -> StorefrontResult<Vec<WalletTransaction>> {
    let transactions: ListResponse<WalletTransaction> =
        call_backend(state, Flow::Wallet, BackendCall::get("/wallet/transactions")).await?;
    Ok(transactions.into_inner())
}
