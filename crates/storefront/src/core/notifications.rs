use api_models::{
    notifications::{DeviceTokenRequest, Notification},
    types::{ListResponse, MessageResponse},
};
use common_utils::{types::ResourceId, validation::require_text};
use masking::{PeekInterface, Secret};
use router_env::{instrument, tracing, Flow};

use crate::{
    core::errors::{StorefrontResult, ValidationErrorExt},
    routes::AppState,
    services::{call_backend, BackendCall},
};

#[instrument(skip_all)]
pub async fn list(state: &AppState) -> StorefrontResult<Vec<Notification>> {
    let notifications: ListResponse<Notification> =
        call_backend(state, Flow::Notifications, BackendCall::get("/notifications")).await?;
    Ok(notifications.into_inner())
}

pub async fn mark_read(
    state: &AppState,
    notification_id: &ResourceId,
) -> StorefrontResult<MessageResponse> {
    call_backend(
        state,
        Flow::Notifications,
        BackendCall::put(format!("/notifications/{notification_id}/read")),
    )
    .await
}

/// Registers the push messaging token of this device. The token is opaque to the client.
#[instrument(skip_all, fields(platform = %platform))]
pub async fn register_device_token(
    state: &AppState,
    token: Secret<String>,
    platform: &str,
) -> StorefrontResult<MessageResponse> {
    require_text("device_token", Some(token.peek().as_str())).to_validation_failed()?;
    call_backend(
        state,
        Flow::Notifications,
        BackendCall::post("/notifications/device-token").json(DeviceTokenRequest {
            token,
            platform: platform.to_string(),
        }),
    )
    .await
}
