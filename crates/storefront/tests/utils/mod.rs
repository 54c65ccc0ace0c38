#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use storefront::{
    configs::settings::Settings,
    core::{
        errors::StorefrontResult,
        payments::{CheckoutLauncher, CheckoutOutcome, CheckoutRequest},
    },
    services::authentication::InMemoryTokenStore,
    AppState,
};

pub const TOKEN: &str = "token-3f9a1c";

pub fn settings(base_url: &str) -> Settings {
    let mut settings = Settings::default();
    settings.backend.base_url = base_url.to_string();
    settings.backend.request_timeout_secs = 5;
    settings.verification.initial_backoff_ms = 1;
    settings
}

pub fn signed_in(base_url: &str) -> AppState {
    AppState::with_token_store(
        settings(base_url),
        Box::new(InMemoryTokenStore::with_token(TOKEN)),
    )
    .unwrap()
}

pub fn signed_out(base_url: &str) -> AppState {
    AppState::with_token_store(settings(base_url), Box::<InMemoryTokenStore>::default()).unwrap()
}

pub fn bearer() -> String {
    format!("Bearer {TOKEN}")
}

/// An enrollment with two pending installments
pub fn user_scheme() -> Value {
    json!({
        "id": 41,
        "scheme_id": 3,
        "monthly_amount": "5000.00",
        "status": "pending",
        "start_date": "2024-04-01",
        "installments": [
            {"id": 902, "installment_number": 2, "amount": 5000, "status": "pending"},
            {"id": 901, "installment_number": 1, "amount": 5000, "status": "pending"}
        ]
    })
}

/// Hosted checkout that answers with a fixed outcome and remembers what it was asked
#[derive(Debug)]
pub struct ScriptedLauncher {
    outcome: CheckoutOutcome,
    pub requests: Mutex<Vec<CheckoutRequest>>,
}

impl ScriptedLauncher {
    pub fn new(outcome: CheckoutOutcome) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding_with(payload: Value) -> Self {
        Self::new(CheckoutOutcome::Success(payload))
    }

    pub fn launched(&self) -> Vec<CheckoutRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheckoutLauncher for ScriptedLauncher {
    async fn launch(&self, request: &CheckoutRequest) -> StorefrontResult<CheckoutOutcome> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.outcome.clone())
    }
}
