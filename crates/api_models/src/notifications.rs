use common_utils::{custom_serde, types::ResourceId};
use masking::Secret;
use serde::{Deserialize, Serialize};
use time::Date;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Notification {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    pub title: String,
    #[serde(default, alias = "message")]
    pub body: Option<String>,
    #[serde(default, alias = "is_read")]
    pub read: bool,
    #[serde(default, with = "custom_serde::date::option")]
    pub created_at: Option<Date>,
}

/// Registers a push notification device token with the backend
#[derive(Clone, Debug, Serialize)]
pub struct DeviceTokenRequest {
    pub token: Secret<String>,
    pub platform: String,
}
