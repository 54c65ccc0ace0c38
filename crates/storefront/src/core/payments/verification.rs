//! Idempotent, retrying verification of installment payments.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use api_models::{
    scheme_payments::{VerifySchemePaymentRequest, VerifySchemePaymentResponse},
    schemes::UserScheme,
};
use common_utils::{consts, types::ResourceId};
use error_stack::report;
use router_env::{instrument, logger, tracing, Flow, Tag};

use crate::{
    core::errors::{StorefrontError, StorefrontResult},
    routes::AppState,
    services::{call_backend, BackendCall},
};

const VERIFY_PATH: &str = "/scheme-payments/verify-cashfree";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct VerificationKey {
    installment_id: ResourceId,
    order_id: String,
}

/// A payment the backend confirmed
#[derive(Clone, Debug)]
pub struct VerifiedPayment {
    pub message: String,
    pub user_scheme: Option<UserScheme>,
}

type Slot = Arc<tokio::sync::Mutex<Option<VerifiedPayment>>>;

/// Remembers which installment payments were verified during this run.
///
/// Each `(installment id, order id)` pair owns one slot. A verification holds the slot's lock
/// for as long as it talks to the backend, so a duplicate callback waits for the first one
/// and then finds the result instead of calling the backend again.
#[derive(Debug, Default)]
pub struct VerificationLedger {
    slots: Mutex<HashMap<VerificationKey, Slot>>,
}

impl VerificationLedger {
    fn slot(&self, key: &VerificationKey) -> Slot {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.clone())
            .or_default()
            .clone()
    }

    /// Whether the payment is known to be verified. A verification still in flight counts as
    /// not verified.
    pub fn is_verified(&self, installment_id: &ResourceId, order_id: &str) -> bool {
        let key = VerificationKey {
            installment_id: installment_id.clone(),
            order_id: order_id.to_string(),
        };
        let slot = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        slot.is_some_and(|slot| slot.try_lock().is_ok_and(|verified| verified.is_some()))
    }
}

/// Result of a verify call
#[derive(Clone, Debug)]
pub struct VerificationResult {
    pub message: String,
    pub user_scheme: Option<UserScheme>,
    /// Where the front end navigates next; set only by the call that verified the payment
    pub navigate_to: Option<String>,
    /// The payment had already been verified; no call was made
    pub already_verified: bool,
}

/// Confirms an installment payment with the backend.
///
/// Verifying the same installment and order again returns the earlier result without a
/// backend call. Network failures are retried with exponential backoff; rejections are not.
#[instrument(skip_all, fields(installment_id = %request.scheme_payment_id, order_id = %request.order_id))]
pub async fn verify_installment(
    state: &AppState,
    request: VerifySchemePaymentRequest,
) -> StorefrontResult<VerificationResult> {
    state.session.require_token()?;

    let key = VerificationKey {
        installment_id: request.scheme_payment_id.clone(),
        order_id: request.order_id.clone(),
    };
    let slot = state.verification_ledger.slot(&key);
    let mut verified = slot.lock().await;

    if let Some(previous) = verified.as_ref() {
        logger::info!(
            tag = ?Tag::GatewayCallback,
            "Duplicate payment confirmation ignored; installment already verified"
        );
        return Ok(VerificationResult {
            message: previous.message.clone(),
            user_scheme: previous.user_scheme.clone(),
            navigate_to: None,
            already_verified: true,
        });
    }

    let response = verify_with_retry(state, &request).await?;
    if response.success == Some(false) {
        let message = response
            .message
            .unwrap_or_else(|| consts::GENERIC_ERROR_MESSAGE.to_string());
        logger::warn!(%message, "Backend declined the payment verification");
        return Err(report!(StorefrontError::Gateway { message }));
    }

    let payment = VerifiedPayment {
        message: response
            .message
            .unwrap_or_else(|| consts::PAYMENT_SUCCESS_MESSAGE.to_string()),
        user_scheme: response.user_scheme,
    };
    *verified = Some(payment.clone());
    logger::info!(tag = ?Tag::Event, "Installment payment verified");

    Ok(VerificationResult {
        message: payment.message,
        user_scheme: payment.user_scheme,
        navigate_to: Some(consts::PROFILE_ROUTE.to_string()),
        already_verified: false,
    })
}

async fn verify_with_retry(
    state: &AppState,
    request: &VerifySchemePaymentRequest,
) -> StorefrontResult<VerifySchemePaymentResponse> {
    let policy = &state.conf.verification;
    let mut backoff = Duration::from_millis(policy.initial_backoff_ms);
    let mut attempt = 1;

    loop {
        let call = BackendCall::post(VERIFY_PATH).json(request.clone());
        match call_backend(state, Flow::InstallmentVerify, call).await {
            Ok(response) => return Ok(response),
            Err(error)
                if error.current_context().is_retryable() && attempt < policy.max_attempts =>
            {
                logger::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    backoff = ?backoff,
                    error = ?error,
                    "Payment verification failed; retrying"
                );
                tokio::time::sleep(backoff).await;
                backoff = backoff.saturating_mul(2);
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_flight_verification_is_not_reported_as_verified() {
        let ledger = VerificationLedger::default();
        let installment_id = ResourceId::from(901_u64);
        let key = VerificationKey {
            installment_id: installment_id.clone(),
            order_id: "order_1".to_string(),
        };

        let slot = ledger.slot(&key);
        let mut guard = slot.lock().await;
        assert!(!ledger.is_verified(&installment_id, "order_1"));

        *guard = Some(VerifiedPayment {
            message: "ok".to_string(),
            user_scheme: None,
        });
        drop(guard);
        assert!(ledger.is_verified(&installment_id, "order_1"));
        assert!(!ledger.is_verified(&installment_id, "order_2"));
    }

    #[test]
    fn asking_about_a_payment_does_not_record_it() {
        let ledger = VerificationLedger::default();
        for order in ["order_1", "order_2", "order_3"] {
            assert!(!ledger.is_verified(&ResourceId::from(901_u64), order));
        }
        assert!(ledger
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty());
    }
}
