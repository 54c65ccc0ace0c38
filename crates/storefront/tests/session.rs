#![allow(clippy::unwrap_used)]

mod utils;

use api_models::{custom_orders::CustomOrderForm, orders::CheckoutForm, user::SignupForm};
use masking::Secret;
use serde_json::json;
use storefront::{
    core::{custom_orders, errors::StorefrontError, orders, schemes, user},
    services::authentication::{FileTokenStore, TokenStore},
    AppState,
};
use wiremock::{
    matchers::{any, body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn signin_persists_the_token_for_the_next_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "asha@example.com",
            "password": "s3cret-pass"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "token-from-login",
            "user": {"id": 7, "name": "Asha"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user-schemes"))
        .and(header("Authorization", "Bearer token-from-login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [utils::user_scheme()]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let directory = tempfile::tempdir().unwrap();
    let token_path = directory.path().join("session.json");

    let state = AppState::with_token_store(
        utils::settings(&server.uri()),
        Box::new(FileTokenStore::new(&token_path)),
    )
    .unwrap();
    assert!(!state.session.is_authenticated());

    let response = user::signin(
        &state,
        Some("asha@example.com"),
        Some(&Secret::new("s3cret-pass".to_string())),
    )
    .await
    .unwrap();
    assert_eq!(response.user.unwrap().name.as_deref(), Some("Asha"));

    let restored = AppState::with_token_store(
        utils::settings(&server.uri()),
        Box::new(FileTokenStore::new(&token_path)),
    )
    .unwrap();
    assert!(restored.session.is_authenticated());

    let enrollments = schemes::my_schemes(&restored).await.unwrap();
    assert_eq!(enrollments.len(), 1);

    user::logout(&restored).unwrap();
    assert!(!restored.session.is_authenticated());
    assert!(FileTokenStore::new(&token_path).load().unwrap().is_none());
}

#[tokio::test]
async fn unauthorized_response_ends_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user-schemes"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})))
        .expect(1)
        .mount(&server)
        .await;

    let state = utils::signed_in(&server.uri());
    let error = schemes::my_schemes(&state).await.unwrap_err();

    assert_eq!(error.current_context(), &StorefrontError::unauthenticated());
    assert_eq!(error.current_context().redirect_to(), Some("/signin"));
    assert!(!state.session.is_authenticated());
}

#[tokio::test]
async fn token_never_shows_in_debug_output() {
    let state = utils::signed_in("http://localhost:5000/api");
    let debug = format!("{:?} {:?}", state, state.session.authorization_header());

    assert!(!debug.contains(utils::TOKEN));
}

#[tokio::test]
async fn incomplete_forms_are_never_submitted() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = utils::signed_in(&server.uri());

    let signup = SignupForm {
        name: Some("Asha".to_string()),
        email: Some("asha@example.com".to_string()),
        mobile: None,
        password: Some(Secret::new("s3cret-pass".to_string())),
        confirm_password: Some(Secret::new("s3cret-pass".to_string())),
    };
    let error = user::signup(&state, &signup).await.unwrap_err();
    assert_eq!(
        error.current_context(),
        &StorefrontError::Validation {
            message: "Mobile is required".to_string()
        }
    );

    let mismatched = SignupForm {
        mobile: Some("9876543210".to_string()),
        confirm_password: Some(Secret::new("other-pass".to_string())),
        ..signup
    };
    let error = user::signup(&state, &mismatched).await.unwrap_err();
    assert_eq!(
        error.current_context().user_message(),
        "Passwords do not match"
    );

    let checkout = CheckoutForm {
        name: Some("Asha".to_string()),
        mobile: Some("9876543210".to_string()),
        line1: Some("12 MG Road".to_string()),
        city: Some("Bengaluru".to_string()),
        state: Some("Karnataka".to_string()),
        pincode: Some("  ".to_string()),
        payment_method: Some("cod".to_string()),
        ..Default::default()
    };
    let error = orders::place_order(&state, &checkout).await.unwrap_err();
    assert_eq!(
        error.current_context().user_message(),
        "Pincode is required"
    );

    let custom_order = CustomOrderForm {
        name: Some("Asha".to_string()),
        mobile: Some("9876543210".to_string()),
        jewelry_type: Some("Necklace".to_string()),
        description: None,
        ..Default::default()
    };
    let error = custom_orders::create(&state, &custom_order)
        .await
        .unwrap_err();
    assert_eq!(
        error.current_context().user_message(),
        "Description is required"
    );

    let error = user::signin(&state, Some(""), Some(&Secret::new("pass".to_string())))
        .await
        .unwrap_err();
    assert_eq!(
        error.current_context().user_message(),
        "Email or mobile is required"
    );
}
