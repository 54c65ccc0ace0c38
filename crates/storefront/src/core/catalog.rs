use api_models::{
    catalog::{Category, Collection, Product, ProductQuery},
    types::ListResponse,
};
use common_utils::types::ResourceId;
use router_env::{instrument, tracing, Flow};

use crate::{
    core::errors::StorefrontResult,
    routes::AppState,
    services::{call_backend, AuthRequirement, BackendCall},
};

#[instrument(skip_all)]
pub async fn list_products(state: &AppState, query: &ProductQuery) -> StorefrontResult<Vec<Product>> {
    let call = BackendCall::get("/products")
        .auth(AuthRequirement::Optional)
        .query(query)?;
    let products: ListResponse<Product> = call_backend(state, Flow::CatalogRetrieve, call).await?;
    Ok(products.into_inner())
}

#[instrument(skip_all, fields(product_id = %product_id))]
pub async fn get_product(state: &AppState, product_id: &ResourceId) -> StorefrontResult<Product> {
    call_backend(
        state,
        Flow::CatalogRetrieve,
        BackendCall::get(format!("/products/{product_id}")).auth(AuthRequirement::Optional),
    )
    .await
}

pub async fn list_categories(state: &AppState) -> StorefrontResult<Vec<Category>> {
    let categories: ListResponse<Category> = call_backend(
        state,
        Flow::CatalogRetrieve,
        BackendCall::get("/categories").auth(AuthRequirement::None),
    )
    .await?;
    Ok(categories.into_inner())
}

pub async fn list_collections(state: &AppState) -> StorefrontResult<Vec<Collection>> {
    let collections: ListResponse<Collection> = call_backend(
        state,
        Flow::CatalogRetrieve,
        BackendCall::get("/collections").auth(AuthRequirement::None),
    )
    .await?;
    Ok(collections.into_inner())
}
