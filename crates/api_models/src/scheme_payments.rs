//! Installment payment protocol between the client, the backend and the hosted checkout.

use common_utils::types::ResourceId;
use serde::{Deserialize, Serialize};

use crate::schemes::UserScheme;

/// A payment gateway order minted by the backend for one installment.
///
/// This is the canonical shape; it is accepted flat or wrapped under `data`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct GatewayOrder {
    pub order_id: String,
    pub payment_session_id: String,
}

#[derive(Clone, Debug, Deserialize)]
struct GatewayOrderEnvelope {
    data: GatewayOrder,
}

impl GatewayOrder {
    /// Reads the canonical order from a backend payload, flat or under `data`.
    pub fn from_payload(payload: &serde_json::Value) -> Option<Self> {
        Self::deserialize(payload)
            .ok()
            .or_else(|| {
                GatewayOrderEnvelope::deserialize(payload)
                    .ok()
                    .map(|envelope| envelope.data)
            })
            .filter(|order| !order.payment_session_id.trim().is_empty())
    }
}

/// Body of `POST /scheme-payments/verify-cashfree`.
///
/// The transaction id travels as `razorpay_payment_id` on the wire even though it carries
/// the hosted checkout gateway's payment id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifySchemePaymentRequest {
    pub scheme_payment_id: ResourceId,
    pub order_id: String,
    #[serde(rename = "razorpay_payment_id")]
    pub gateway_payment_id: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct VerifySchemePaymentResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default, alias = "userScheme")]
    pub user_scheme: Option<UserScheme>,
}

/// Response to enrollment. The gateway order details ride along in an unstable shape, so the
/// raw payload is kept next to the typed parts.
#[derive(Clone, Debug, Deserialize)]
pub struct EnrollResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "userScheme", alias = "enrollment")]
    pub user_scheme: Option<UserScheme>,
}
