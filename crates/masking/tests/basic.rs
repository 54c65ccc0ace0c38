#![allow(dead_code, clippy::unwrap_used, clippy::panic_in_result_fn)]

use masking as pii;

#[test]
fn basic() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use pii::{Secret, SerializableSecret};
    use serde::Serialize;

    #[derive(Clone, Debug, Serialize, PartialEq, Eq)]
    pub struct MobileNumber(String);

    impl SerializableSecret for MobileNumber {}

    #[derive(Clone, Debug, Serialize, PartialEq, Eq)]
    pub struct Customer {
        mobile: Secret<MobileNumber>,
        name: String,
    }

    let customer = Customer {
        mobile: Secret::new(MobileNumber("9876543210".to_string())),
        name: "Anu".to_string(),
    };

    let customer2 = customer.clone();
    assert_eq!(customer, customer2);

    let got = format!("{:?}", customer);
    let exp = "Customer { mobile: *** basic::basic::MobileNumber ***, name: \"Anu\" }";
    assert_eq!(got, exp);

    let got = serde_json::to_string(&customer).unwrap();
    let exp = "{\"mobile\":\"9876543210\",\"name\":\"Anu\"}";
    assert_eq!(got, exp);

    Ok(())
}

#[test]
fn masked_serialization_hides_secrets() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use pii::Secret;
    use serde::Serialize;

    #[derive(Debug, Serialize)]
    pub struct SigninRequest {
        email: String,
        password: Secret<String>,
    }

    let request = SigninRequest {
        email: "anu@example.com".to_string(),
        password: Secret::new("hunter2".to_string()),
    };

    let masked = pii::masked_serialize(&request)?;
    assert_eq!(
        masked,
        serde_json::json!({
            "email": "anu@example.com",
            "password": "*** alloc::string::String ***"
        })
    );

    // plain serialization is unaffected once the masked pass is over
    let plain = serde_json::to_value(&request)?;
    assert_eq!(plain["password"], "hunter2");

    Ok(())
}

#[test]
fn zeroize_clears_inner_value() {
    use pii::{PeekInterface, Secret, ZeroizableSecret};

    let mut token = Secret::<String>::new("session-token".to_string());
    token.zeroize();
    assert!(token.peek().is_empty());
}

#[test]
fn maskable_header_values() {
    use pii::{Mask, Maskable};

    let auth = "Bearer abc".to_string().into_masked();
    let content_type: Maskable<String> = "application/json".into();

    assert!(auth.is_masked());
    assert!(!content_type.is_masked());
    assert_eq!(format!("{auth:?}"), "*** alloc::string::String ***");
    assert_eq!(auth.inner(), "Bearer abc");
    assert_eq!(content_type.inner(), "application/json");
}
