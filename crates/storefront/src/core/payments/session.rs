//! Reading payment session, order and transaction ids out of gateway payloads.
//!
//! The backend has returned gateway orders flat, under `data`, under `payment` and under
//! `order`, with snake case or camel case keys. [`resolve_session`] reads the canonical
//! [`GatewayOrder`] shape and, in [`SessionLookup::Compatible`] mode, falls back to a
//! key name search over the whole payload.

use api_models::scheme_payments::GatewayOrder;
use router_env::logger;
use serde_json::Value;

use crate::configs::settings::SessionLookup;

/// Keys a payment session id has been sent under, most specific first
pub const SESSION_ID_KEYS: [&str; 7] = [
    "payment_session_id",
    "paymentSessionId",
    "session_id",
    "sessionId",
    "order_token",
    "orderToken",
    "token",
];

/// Keys the gateway transaction id has been reported under
pub const TRANSACTION_ID_KEYS: [&str; 7] = [
    "cf_payment_id",
    "payment_id",
    "paymentId",
    "transaction_id",
    "transactionId",
    "txn_id",
    "razorpay_payment_id",
];

const ORDER_ID_KEYS: [&str; 4] = ["order_id", "orderId", "cf_order_id", "gateway_order_id"];

/// A payment session ready to be handed to the hosted checkout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSession {
    pub payment_session_id: String,
    /// Gateway order id, when the payload carried one
    pub order_id: Option<String>,
}

impl From<GatewayOrder> for ResolvedSession {
    fn from(order: GatewayOrder) -> Self {
        Self {
            payment_session_id: order.payment_session_id,
            order_id: Some(order.order_id).filter(|order_id| !order_id.trim().is_empty()),
        }
    }
}

/// Searches `payload` for the first non-blank value stored under any of `keys`.
///
/// The payload is walked one depth at a time. Within a depth every key is tried, in order,
/// against every object before anything deeper is looked at, so a shallow match wins over a
/// deeper one and an earlier key wins over a later one at the same depth. Numbers are
/// returned in their decimal form.
pub fn find_by_keys(payload: &Value, keys: &[&str]) -> Option<String> {
    let mut level = vec![payload];
    while !level.is_empty() {
        let found = keys.iter().find_map(|key| {
            level.iter().find_map(|node| match node {
                Value::Object(map) => map.get(*key).and_then(scalar_text),
                _ => None,
            })
        });
        if found.is_some() {
            return found;
        }
        level = level.into_iter().flat_map(children).collect();
    }
    None
}

fn children(value: &Value) -> Vec<&Value> {
    match value {
        Value::Object(map) => map.values().collect(),
        Value::Array(items) => items.iter().collect(),
        _ => Vec::new(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Best effort search for a payment session id anywhere in `payload`
pub fn extract_session_id(payload: &Value) -> Option<String> {
    find_by_keys(payload, &SESSION_ID_KEYS)
}

pub fn extract_order_id(payload: &Value) -> Option<String> {
    find_by_keys(payload, &ORDER_ID_KEYS)
}

/// Transaction id reported by the gateway, or `fallback_order_id` when it reported none
pub fn extract_transaction_id(payload: &Value, fallback_order_id: &str) -> String {
    find_by_keys(payload, &TRANSACTION_ID_KEYS).unwrap_or_else(|| {
        logger::info!("No transaction id in checkout result; using the order id");
        fallback_order_id.to_string()
    })
}

/// Reads the payment session out of a backend order payload
pub fn resolve_session(payload: &Value, lookup: SessionLookup) -> Option<ResolvedSession> {
    if let Some(order) = GatewayOrder::from_payload(payload) {
        return Some(order.into());
    }

    match lookup {
        SessionLookup::Strict => {
            logger::warn!("Gateway order payload does not follow the canonical shape");
            None
        }
        SessionLookup::Compatible => {
            extract_session_id(payload).map(|payment_session_id| ResolvedSession {
                payment_session_id,
                order_id: extract_order_id(payload),
            })
        }
    }
}
