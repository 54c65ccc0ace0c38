#![allow(clippy::unwrap_used, clippy::panic)]

mod utils;

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use api_models::scheme_payments::VerifySchemePaymentRequest;
use common_utils::types::{MajorUnit, ResourceId};
use serde_json::json;
use storefront::{
    configs::settings::SessionLookup,
    core::{
        errors::StorefrontError,
        payments::{self, checkout, CheckoutCompletion, CheckoutOutcome, HostedPageLauncher},
        schemes,
    },
    services::authentication::InMemoryTokenStore,
    AppState,
};
use tokio::{io::AsyncReadExt, net::TcpListener};
use utils::{bearer, ScriptedLauncher};
use wiremock::{
    matchers::{any, body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const VERIFY_PATH: &str = "/scheme-payments/verify-cashfree";

fn verify_request(order_id: &str) -> VerifySchemePaymentRequest {
    VerifySchemePaymentRequest {
        scheme_payment_id: ResourceId::from(901_u64),
        order_id: order_id.to_string(),
        gateway_payment_id: "5114910234".to_string(),
    }
}

#[tokio::test]
async fn enroll_then_checkout_then_verify() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user-schemes/enroll"))
        .and(header("Authorization", bearer().as_str()))
        .and(body_json(json!({"scheme_id": 3, "monthly_amount": 5000})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Enrolled successfully",
            "user_scheme": utils::user_scheme(),
            "data": {
                "payment": {"paymentSessionId": "session_abc", "order_id": "order_41_1"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .and(body_json(json!({
            "scheme_payment_id": 901,
            "order_id": "order_41_1",
            "razorpay_payment_id": "5114910234"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Payment verified"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = utils::signed_in(&server.uri());
    let launcher = ScriptedLauncher::succeeding_with(json!({
        "order": {"order_id": "order_41_1"},
        "transaction": {"cf_payment_id": 5114910234_u64}
    }));

    let payment = payments::enroll_and_pay(
        &state,
        &launcher,
        ResourceId::from(3_u64),
        MajorUnit::from(5000_i64),
        None,
    )
    .await
    .unwrap();

    assert_eq!(payment.enrollment.message, "Enrolled successfully");
    assert_eq!(payment.pending.installment_id, ResourceId::from(901_u64));
    assert_eq!(payment.pending.order_id, "order_41_1");
    assert_eq!(payment.pending.payment_session_id, "session_abc");

    let launched = launcher.launched();
    assert_eq!(launched.len(), 1);
    let request = launched.first().unwrap();
    assert_eq!(request.payment_session_id, "session_abc");
    let return_params = checkout::parse_return_url(request.return_url.as_str()).unwrap();
    assert_eq!(return_params.order_id, "order_41_1");
    assert_eq!(return_params.installment_id, ResourceId::from(901_u64));

    match payment.completion {
        CheckoutCompletion::Verified(result) => {
            assert_eq!(result.message, "Payment verified");
            assert_eq!(result.navigate_to.as_deref(), Some("/profile"));
            assert!(!result.already_verified);
        }
        other => panic!("expected a verified payment, got {other:?}"),
    }
}

#[tokio::test]
async fn enrollment_requires_a_session_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = utils::signed_out(&server.uri());
    let launcher = ScriptedLauncher::succeeding_with(json!({}));
    let error = payments::enroll_and_pay(
        &state,
        &launcher,
        ResourceId::from(3_u64),
        MajorUnit::from(5000_i64),
        None,
    )
    .await
    .unwrap_err();

    assert_eq!(
        error.current_context(),
        &StorefrontError::Unauthenticated {
            redirect_to: "/signin".to_string()
        }
    );
    assert!(launcher.launched().is_empty());
}

#[tokio::test]
async fn enrollment_below_the_scheme_minimum_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let scheme = serde_json::from_value(json!({
        "id": 3,
        "name": "Swarna Nidhi",
        "min_monthly_amount": 1000
    }))
    .unwrap();
    let state = utils::signed_in(&server.uri());
    let error = schemes::enroll(
        &state,
        ResourceId::from(3_u64),
        MajorUnit::from(500_i64),
        Some(&scheme),
    )
    .await
    .unwrap_err();

    assert_eq!(
        error.current_context().user_message(),
        "Monthly amount must be at least 1000"
    );
}

#[tokio::test]
async fn backend_rejection_surfaces_its_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user-schemes/enroll"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({"error": "You are already enrolled in this scheme"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let state = utils::signed_in(&server.uri());
    let error = schemes::enroll(
        &state,
        ResourceId::from(3_u64),
        MajorUnit::from(5000_i64),
        None,
    )
    .await
    .unwrap_err();

    assert_eq!(
        error.current_context(),
        &StorefrontError::Backend {
            status: 409,
            message: "You are already enrolled in this scheme".to_string()
        }
    );
}

#[tokio::test]
async fn enrollment_without_session_creates_an_installment_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user-schemes/enroll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": utils::user_scheme()
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/scheme-payments/901/create-order"))
        .and(header("Authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"order_id": "order_41_1", "payment_session_id": "session_xyz"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = utils::signed_in(&server.uri());
    let launcher = HostedPageLauncher::new(&state.conf.checkout);
    let payment = payments::enroll_and_pay(
        &state,
        &launcher,
        ResourceId::from(3_u64),
        MajorUnit::from(5000_i64),
        None,
    )
    .await
    .unwrap();

    assert_eq!(payment.enrollment.message, "Enrolled successfully");
    assert_eq!(payment.pending.payment_session_id, "session_xyz");
    match payment.completion {
        CheckoutCompletion::Redirected { checkout_url } => {
            assert!(checkout_url
                .as_str()
                .starts_with("https://payments-test.cashfree.com/order/"));
            assert!(checkout_url
                .query_pairs()
                .any(|(key, value)| key == "payment_session_id" && value == "session_xyz"));
        }
        other => panic!("expected a redirect, got {other:?}"),
    }
}

#[tokio::test]
async fn strict_lookup_rejects_non_canonical_orders() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scheme-payments/901/create-order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payment": {"paymentSessionId": "session_xyz", "orderId": "order_41_1"}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let installment_id = ResourceId::from(901_u64);

    let compatible = utils::signed_in(&server.uri());
    let pending = payments::initiate_for_installment(&compatible, &installment_id)
        .await
        .unwrap();
    assert_eq!(pending.payment_session_id, "session_xyz");
    assert_eq!(pending.order_id, "order_41_1");

    let mut settings = utils::settings(&server.uri());
    settings.checkout.session_lookup = SessionLookup::Strict;
    let strict = AppState::with_token_store(
        settings,
        Box::new(InMemoryTokenStore::with_token(utils::TOKEN)),
    )
    .unwrap();
    let error = payments::initiate_for_installment(&strict, &installment_id)
        .await
        .unwrap_err();
    assert_eq!(error.current_context(), &StorefrontError::SessionUnavailable);
}

#[tokio::test]
async fn failed_checkout_is_not_verified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scheme-payments/902/create-order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "order_id": "order_41_2",
            "payment_session_id": "session_2"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = utils::signed_in(&server.uri());
    let launcher = ScriptedLauncher::new(CheckoutOutcome::Failure {
        message: "Payment cancelled by user".to_string(),
    });
    let error = payments::pay_installment(&state, &launcher, &ResourceId::from(902_u64))
        .await
        .unwrap_err();

    assert_eq!(
        error.current_context(),
        &StorefrontError::Gateway {
            message: "Payment cancelled by user".to_string()
        }
    );
}

#[tokio::test]
async fn duplicate_callbacks_verify_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true}))
                .set_delay(Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let state = utils::signed_in(&server.uri());
    let (first, second) = tokio::join!(
        payments::verify_installment(&state, verify_request("order_41_1")),
        payments::verify_installment(&state, verify_request("order_41_1")),
    );
    let third = payments::verify_installment(&state, verify_request("order_41_1"))
        .await
        .unwrap();

    let results = [first.unwrap(), second.unwrap(), third];
    let navigations = results
        .iter()
        .filter(|result| result.navigate_to.as_deref() == Some("/profile"))
        .count();
    assert_eq!(navigations, 1);
    assert_eq!(
        results.iter().filter(|result| result.already_verified).count(),
        2
    );
    assert!(results
        .iter()
        .all(|result| result.message == "Payment verified successfully"));
    assert!(state
        .verification_ledger
        .is_verified(&ResourceId::from(901_u64), "order_41_1"));
}

#[tokio::test]
async fn backend_rejections_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "Gateway timeout"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let state = utils::signed_in(&server.uri());
    let error = payments::verify_installment(&state, verify_request("order_41_1"))
        .await
        .unwrap_err();

    assert_eq!(
        error.current_context(),
        &StorefrontError::Backend {
            status: 500,
            message: "Gateway timeout".to_string()
        }
    );
    assert!(!state
        .verification_ledger
        .is_verified(&ResourceId::from(901_u64), "order_41_1"));
}

#[tokio::test]
async fn network_failures_are_retried_up_to_the_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true}))
                .set_delay(Duration::from_millis(2500)),
        )
        .expect(3)
        .mount(&server)
        .await;

    let mut settings = utils::settings(&server.uri());
    settings.backend.request_timeout_secs = 1;
    settings.verification.max_attempts = 3;
    let state = AppState::with_token_store(
        settings,
        Box::new(InMemoryTokenStore::with_token(utils::TOKEN)),
    )
    .unwrap();

    let error = payments::verify_installment(&state, verify_request("order_41_1"))
        .await
        .unwrap_err();
    assert!(matches!(
        error.current_context(),
        StorefrontError::Network { .. }
    ));
}

#[tokio::test]
async fn declined_verification_reports_the_gateway_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Payment not captured"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = utils::signed_in(&server.uri());
    let error = payments::verify_installment(&state, verify_request("order_41_1"))
        .await
        .unwrap_err();
    assert_eq!(
        error.current_context(),
        &StorefrontError::Gateway {
            message: "Payment not captured".to_string()
        }
    );
}

#[tokio::test]
async fn verification_resumes_from_the_return_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .and(body_json(json!({
            "scheme_payment_id": 901,
            "order_id": "order_41_1",
            "razorpay_payment_id": "order_41_1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .and(body_json(json!({
            "scheme_payment_id": 902,
            "order_id": "order_41_2",
            "razorpay_payment_id": "5114910777"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let state = utils::signed_in(&server.uri());

    let return_url = checkout::build_return_url(
        &state.conf.checkout.return_url,
        "order_41_1",
        &ResourceId::from(901_u64),
    )
    .unwrap();
    let result = payments::resume_from_return_url(&state, return_url.as_str(), None)
        .await
        .unwrap();
    assert_eq!(result.navigate_to.as_deref(), Some("/profile"));

    let mut with_payment_id = checkout::build_return_url(
        &state.conf.checkout.return_url,
        "order_41_2",
        &ResourceId::from(902_u64),
    )
    .unwrap();
    with_payment_id
        .query_pairs_mut()
        .append_pair("cf_payment_id", "5114910777");
    payments::resume_from_return_url(&state, with_payment_id.as_str(), None)
        .await
        .unwrap();

    let error = payments::resume_from_return_url(
        &state,
        "http://localhost:3000/payment-status?order_id=order_41_3",
        None,
    )
    .await
    .unwrap_err();
    assert_eq!(error.current_context(), &StorefrontError::InvalidReturnUrl);
}

#[tokio::test]
async fn dropped_connection_does_not_resend_the_enrollment() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let received = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&received);
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buffer = [0_u8; 4096];
            if socket.read(&mut buffer).await.unwrap_or(0) > 0 {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            drop(socket);
        }
    });

    let state = utils::signed_in(&format!("http://{address}"));
    let error = schemes::enroll(
        &state,
        ResourceId::from(3_u64),
        MajorUnit::from(5000_i64),
        None,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        error.current_context(),
        StorefrontError::Network { .. }
    ));
    assert_eq!(received.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn signed_out_enrollment_skips_the_scheme_lookup() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = utils::signed_out(&server.uri());
    let launcher = ScriptedLauncher::succeeding_with(json!({}));
    let error = payments::enroll_in_scheme(
        &state,
        &launcher,
        ResourceId::from(3_u64),
        MajorUnit::from(5000_i64),
    )
    .await
    .unwrap_err();

    assert_eq!(error.current_context(), &StorefrontError::unauthenticated());
    assert!(launcher.launched().is_empty());
}

#[tokio::test]
async fn looked_up_minimum_blocks_a_small_enrollment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schemes/3"))
        .and(header("Authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "name": "Swarna Nidhi",
            "min_monthly_amount": 10000
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user-schemes/enroll"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let state = utils::signed_in(&server.uri());
    let launcher = ScriptedLauncher::succeeding_with(json!({}));
    let error = payments::enroll_in_scheme(
        &state,
        &launcher,
        ResourceId::from(3_u64),
        MajorUnit::from(5000_i64),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        error.current_context(),
        StorefrontError::Validation { .. }
    ));
}

#[tokio::test]
async fn later_installment_is_paid_and_verified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scheme-payments/902/create-order"))
        .and(header("Authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"order_id": "order_41_2", "payment_session_id": "session_2"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .and(body_json(json!({
            "scheme_payment_id": 902,
            "order_id": "order_41_2",
            "razorpay_payment_id": "cf_902"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Installment paid"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = utils::signed_in(&server.uri());
    let launcher = ScriptedLauncher::succeeding_with(json!({"cf_payment_id": "cf_902"}));
    let completion = payments::pay_installment(&state, &launcher, &ResourceId::from(902_u64))
        .await
        .unwrap();

    let launched = launcher.launched();
    assert_eq!(launched.len(), 1);
    let request = launched.first().unwrap();
    assert_eq!(request.payment_session_id, "session_2");
    let return_params = checkout::parse_return_url(request.return_url.as_str()).unwrap();
    assert_eq!(return_params.order_id, "order_41_2");
    assert_eq!(return_params.installment_id, ResourceId::from(902_u64));

    match completion {
        CheckoutCompletion::Verified(result) => {
            assert_eq!(result.message, "Installment paid");
            assert_eq!(result.navigate_to.as_deref(), Some("/profile"));
            assert!(!result.already_verified);
        }
        other => panic!("expected a verified installment, got {other:?}"),
    }
}
