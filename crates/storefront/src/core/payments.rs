//! Installment payments: minting a payment session, handing it to the hosted checkout and
//! verifying the result.
//!
//! The flow runs in two phases. `initiate_*` produces a [`PendingCheckout`]; the checkout's
//! outcome (from a [`CheckoutLauncher`] or a return URL) is then passed to
//! [`complete_checkout`] or [`resume_from_return_url`], which verify the payment.

pub mod checkout;
pub mod session;
pub mod verification;

use api_models::{
    scheme_payments::VerifySchemePaymentRequest,
    schemes::{Scheme, SchemePayment},
};
use common_utils::types::{MajorUnit, ResourceId};
use error_stack::{report, ResultExt};
use router_env::{instrument, logger, tracing, Flow, Tag};

pub use self::{
    checkout::{CheckoutLauncher, CheckoutOutcome, CheckoutRequest, HostedPageLauncher},
    verification::{verify_installment, VerificationLedger, VerificationResult},
};
use crate::{
    core::{
        errors::{StorefrontError, StorefrontResult},
        schemes::{self, Enrollment},
    },
    routes::AppState,
    services::{call_backend_raw, BackendCall},
};

/// A payment session waiting for the customer to pay one installment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingCheckout {
    pub installment_id: ResourceId,
    pub order_id: String,
    pub payment_session_id: String,
}

/// How far a checkout got
#[derive(Clone, Debug)]
pub enum CheckoutCompletion {
    /// The payment was confirmed by the backend
    Verified(VerificationResult),
    /// The customer was sent to the hosted page; verification resumes from the return URL
    Redirected { checkout_url: url::Url },
}

/// Payment session for the first pending installment of a fresh enrollment.
///
/// Uses the session carried by the enrollment response when there is one, otherwise mints a
/// new order for the installment.
#[instrument(skip_all, fields(user_scheme_id = %enrollment.user_scheme.id))]
pub async fn initiate_for_enrollment(
    state: &AppState,
    enrollment: &Enrollment,
) -> StorefrontResult<PendingCheckout> {
    let installment = match enrollment.user_scheme.next_pending_installment() {
        Some(installment) => installment.clone(),
        None => first_pending_installment(state, &enrollment.user_scheme.id).await?,
    };

    let carried = session::resolve_session(&enrollment.payload, state.conf.checkout.session_lookup)
        .and_then(|resolved| {
            resolved
                .order_id
                .or_else(|| installment.gateway_order_id.clone())
                .map(|order_id| PendingCheckout {
                    installment_id: installment.id.clone(),
                    order_id,
                    payment_session_id: resolved.payment_session_id,
                })
        });

    match carried {
        Some(pending) => {
            logger::info!(installment_id = %pending.installment_id, "Using payment session from enrollment");
            Ok(pending)
        }
        None => {
            logger::info!(
                installment_id = %installment.id,
                "Enrollment carried no payment session; creating an order for the installment"
            );
            initiate_for_installment(state, &installment.id).await
        }
    }
}

/// The enrollment response listed no installments; the stored enrollment is read instead
async fn first_pending_installment(
    state: &AppState,
    user_scheme_id: &ResourceId,
) -> StorefrontResult<SchemePayment> {
    let user_scheme = schemes::get_user_scheme(state, user_scheme_id).await?;
    user_scheme
        .next_pending_installment()
        .cloned()
        .ok_or_else(|| report!(StorefrontError::SessionUnavailable))
        .attach_printable_lazy(|| format!("user scheme {user_scheme_id} has no pending installment"))
}

/// Mints a fresh gateway order for one installment
#[instrument(skip_all, fields(installment_id = %installment_id))]
pub async fn initiate_for_installment(
    state: &AppState,
    installment_id: &ResourceId,
) -> StorefrontResult<PendingCheckout> {
    let payload = call_backend_raw(
        state,
        Flow::InstallmentOrderCreate,
        BackendCall::post(format!("/scheme-payments/{installment_id}/create-order")),
    )
    .await?;

    let resolved = session::resolve_session(&payload, state.conf.checkout.session_lookup)
        .ok_or_else(|| report!(StorefrontError::SessionUnavailable))
        .attach_printable("installment order carries no payment session id")?;
    let order_id = resolved
        .order_id
        .ok_or_else(|| report!(StorefrontError::SessionUnavailable))
        .attach_printable("installment order carries no order id")?;

    Ok(PendingCheckout {
        installment_id: installment_id.clone(),
        order_id,
        payment_session_id: resolved.payment_session_id,
    })
}

/// Opens the hosted checkout for `pending`
#[instrument(skip_all, fields(installment_id = %pending.installment_id, order_id = %pending.order_id))]
pub async fn launch_checkout(
    state: &AppState,
    launcher: &dyn CheckoutLauncher,
    pending: &PendingCheckout,
) -> StorefrontResult<CheckoutOutcome> {
    let settings = &state.conf.checkout;
    let request = CheckoutRequest {
        payment_session_id: pending.payment_session_id.clone(),
        order_id: pending.order_id.clone(),
        installment_id: pending.installment_id.clone(),
        mode: settings.mode,
        redirect_target: settings.redirect_target,
        return_url: checkout::build_return_url(
            &settings.return_url,
            &pending.order_id,
            &pending.installment_id,
        )?,
    };

    logger::info!(tag = ?Tag::InitiatedToGateway, flow = %Flow::InstallmentCheckout);
    launcher.launch(&request).await
}

/// Verifies a successful checkout. A failed checkout surfaces the gateway's message only.
pub async fn complete_checkout(
    state: &AppState,
    pending: &PendingCheckout,
    outcome: CheckoutOutcome,
) -> StorefrontResult<CheckoutCompletion> {
    match outcome {
        CheckoutOutcome::Success(payload) => {
            logger::info!(tag = ?Tag::GatewayCallback, order_id = %pending.order_id, "Checkout succeeded");
            let gateway_payment_id = session::extract_transaction_id(&payload, &pending.order_id);
            verification::verify_installment(
                state,
                VerifySchemePaymentRequest {
                    scheme_payment_id: pending.installment_id.clone(),
                    order_id: pending.order_id.clone(),
                    gateway_payment_id,
                },
            )
            .await
            .map(CheckoutCompletion::Verified)
        }
        CheckoutOutcome::Failure { message } => {
            logger::warn!(tag = ?Tag::GatewayCallback, order_id = %pending.order_id, %message, "Checkout failed");
            Err(report!(StorefrontError::Gateway { message }))
        }
        CheckoutOutcome::Redirected { checkout_url } => {
            Ok(CheckoutCompletion::Redirected { checkout_url })
        }
    }
}

/// Outcome of enrolling and paying the first installment
#[derive(Clone, Debug)]
pub struct EnrollmentPayment {
    pub enrollment: Enrollment,
    pub pending: PendingCheckout,
    pub completion: CheckoutCompletion,
}

/// Enrolls in a scheme and runs the checkout for the first installment
pub async fn enroll_and_pay(
    state: &AppState,
    launcher: &dyn CheckoutLauncher,
    scheme_id: ResourceId,
    monthly_amount: MajorUnit,
    scheme: Option<&Scheme>,
) -> StorefrontResult<EnrollmentPayment> {
    let enrollment = schemes::enroll(state, scheme_id, monthly_amount, scheme).await?;
    let pending = initiate_for_enrollment(state, &enrollment).await?;
    let outcome = launch_checkout(state, launcher, &pending).await?;
    let completion = complete_checkout(state, &pending, outcome).await?;
    Ok(EnrollmentPayment {
        enrollment,
        pending,
        completion,
    })
}

/// Looks the scheme up for its minimum amount, then enrolls and pays the first installment.
///
/// Signed out customers are turned away before the lookup is sent. A failed lookup only
/// skips the local minimum check; the backend still enforces it.
pub async fn enroll_in_scheme(
    state: &AppState,
    launcher: &dyn CheckoutLauncher,
    scheme_id: ResourceId,
    monthly_amount: MajorUnit,
) -> StorefrontResult<EnrollmentPayment> {
    state.session.require_token()?;
    let scheme = schemes::get_scheme(state, &scheme_id)
        .await
        .map_err(|error| logger::warn!(?error, "Scheme lookup failed; enrolling without it"))
        .ok();
    enroll_and_pay(state, launcher, scheme_id, monthly_amount, scheme.as_ref()).await
}

/// Runs the checkout for a later installment
pub async fn pay_installment(
    state: &AppState,
    launcher: &dyn CheckoutLauncher,
    installment_id: &ResourceId,
) -> StorefrontResult<CheckoutCompletion> {
    state.session.require_token()?;
    let pending = initiate_for_installment(state, installment_id).await?;
    let outcome = launch_checkout(state, launcher, &pending).await?;
    complete_checkout(state, &pending, outcome).await
}

/// Verifies the payment named by a checkout return URL.
///
/// `transaction_id` overrides the one carried on the URL; without either the order id is used.
pub async fn resume_from_return_url(
    state: &AppState,
    return_url: &str,
    transaction_id: Option<String>,
) -> StorefrontResult<VerificationResult> {
    let params = checkout::parse_return_url(return_url)?;
    let gateway_payment_id = transaction_id
        .or(params.transaction_id)
        .unwrap_or_else(|| params.order_id.clone());

    verification::verify_installment(
        state,
        VerifySchemePaymentRequest {
            scheme_payment_id: params.installment_id,
            order_id: params.order_id,
            gateway_payment_id,
        },
    )
    .await
}
