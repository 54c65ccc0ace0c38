//! Back office calls. Only the requests; the console screens are out of scope.

use api_models::{
    admin::{
        Banner, BannerRequest, Coupon, CouponRequest, ReportQuery, ReportSummary,
        UpdateOrderStatusRequest,
    },
    enums::OrderStatus,
    orders::Order,
    rates::{GoldRate, UpdateRatesRequest},
    types::{ListResponse, MessageResponse},
};
use common_utils::{fp_utils::when, types::ResourceId};
use error_stack::report;
use router_env::{instrument, tracing, Flow};

use crate::{
    core::{
        errors::{StorefrontError, StorefrontResult, ValidationErrorExt},
        forms,
    },
    routes::AppState,
    services::{call_backend, BackendCall},
};

pub async fn list_orders(state: &AppState) -> StorefrontResult<Vec<Order>> {
    let orders: ListResponse<Order> =
        call_backend(state, Flow::Admin, BackendCall::get("/admin/orders")).await?;
    Ok(orders.into_inner())
}

#[instrument(skip_all, fields(order_id = %order_id, status = %status))]
pub async fn update_order_status(
    state: &AppState,
    order_id: &ResourceId,
    status: OrderStatus,
) -> StorefrontResult<MessageResponse> {
    when(status == OrderStatus::Unknown, || {
        Err(report!(StorefrontError::Validation {
            message: "Please choose an order status".to_string(),
        }))
    })?;
    call_backend(
        state,
        Flow::Admin,
        BackendCall::put(format!("/admin/orders/{order_id}/status"))
            .json(UpdateOrderStatusRequest { status }),
    )
    .await
}

pub async fn list_coupons(state: &AppState) -> StorefrontResult<Vec<Coupon>> {
    let coupons: ListResponse<Coupon> =
        call_backend(state, Flow::Admin, BackendCall::get("/admin/coupons")).await?;
    Ok(coupons.into_inner())
}

#[instrument(skip_all, fields(code = %coupon.code))]
pub async fn create_coupon(
    state: &AppState,
    coupon: CouponRequest,
) -> StorefrontResult<MessageResponse> {
    forms::validate_coupon(&coupon)?;
    call_backend(
        state,
        Flow::Admin,
        BackendCall::post("/admin/coupons").json(coupon),
    )
    .await
}

#[instrument(skip_all, fields(coupon_id = %coupon_id))]
pub async fn update_coupon(
    state: &AppState,
    coupon_id: &ResourceId,
    coupon: CouponRequest,
) -> StorefrontResult<MessageResponse> {
    forms::validate_coupon(&coupon)?;
    call_backend(
        state,
        Flow::Admin,
        BackendCall::put(format!("/admin/coupons/{coupon_id}")).json(coupon),
    )
    .await
}

pub async fn delete_coupon(
    state: &AppState,
    coupon_id: &ResourceId,
) -> StorefrontResult<MessageResponse> {
    call_backend(
        state,
        Flow::Admin,
        BackendCall::delete(format!("/admin/coupons/{coupon_id}")),
    )
    .await
}

pub async fn list_banners(state: &AppState) -> StorefrontResult<Vec<Banner>> {
    let banners: ListResponse<Banner> =
        call_backend(state, Flow::Admin, BackendCall::get("/admin/banners")).await?;
    Ok(banners.into_inner())
}

pub async fn create_banner(
    state: &AppState,
    banner: BannerRequest,
) -> StorefrontResult<MessageResponse> {
    forms::validate_banner(&banner)?;
    call_backend(
        state,
        Flow::Admin,
        BackendCall::post("/admin/banners").json(banner),
    )
    .await
}

pub async fn delete_banner(
    state: &AppState,
    banner_id: &ResourceId,
) -> StorefrontResult<MessageResponse> {
    call_backend(
        state,
        Flow::Admin,
        BackendCall::delete(format!("/admin/banners/{banner_id}")),
    )
    .await
}

/// Replaces the published rates. Every rate must be positive.
pub async fn update_rates(
    state: &AppState,
    rates: Vec<GoldRate>,
) -> StorefrontResult<MessageResponse> {
    when(rates.is_empty(), || {
        Err(report!(StorefrontError::Validation {
            message: "At least one rate is required".to_string(),
        }))
    })?;
    if let Some(rate) = rates.iter().find(|rate| !rate.rate_per_gram.is_positive()) {
        return Err(report!(StorefrontError::Validation {
            message: format!("Rate for {} must be greater than zero", rate.purity),
        }));
    }
    call_backend(
        state,
        Flow::Admin,
        BackendCall::put("/admin/rates").json(UpdateRatesRequest { rates }),
    )
    .await
}

#[instrument(skip_all, fields(from = %query.from, to = %query.to))]
pub async fn report_summary(
    state: &AppState,
    query: ReportQuery,
) -> StorefrontResult<ReportSummary> {
    common_utils::validation::validate_not_before("Report end date", query.to, query.from)
        .to_validation_failed()?;
    let call = BackendCall::get("/admin/reports/summary").query(&query)?;
    call_backend(state, Flow::Admin, call).await
}
