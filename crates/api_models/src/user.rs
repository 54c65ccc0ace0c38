use common_utils::{
    pii::{self, EmailStrategy, PhoneNumberStrategy},
    types::ResourceId,
};
use masking::Secret;
use serde::{Deserialize, Serialize};

/// A storefront customer as returned by the backend
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<Secret<String, EmailStrategy>>,
    #[serde(default, alias = "phone")]
    pub mobile: Option<Secret<String, PhoneNumberStrategy>>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Credentials for `POST /auth/login`. `identifier` is an email address or a mobile number.
#[derive(Debug, Serialize)]
pub struct SigninRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<pii::Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<pii::PhoneNumber>,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: pii::Email,
    pub mobile: pii::PhoneNumber,
    pub password: Secret<String>,
}

/// Sign-up form as typed by the customer; every field is required
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub password: Option<Secret<String>>,
    #[serde(default)]
    pub confirm_password: Option<Secret<String>>,
}

/// Answer to sign-in and sign-up
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: Secret<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use masking::PeekInterface;

    use super::*;

    #[test]
    fn auth_response_keeps_token_out_of_debug() {
        let response: AuthResponse = serde_json::from_str(
            r#"{"token":"eyJhbGciOiJIUzI1NiJ9.secret","user":{"_id":"u1","name":"Meera","mobile":"9876543210"}}"#,
        )
        .unwrap();

        assert_eq!(response.token.peek(), "eyJhbGciOiJIUzI1NiJ9.secret");
        let debug = format!("{response:?}");
        assert!(!debug.contains("eyJhbGciOiJIUzI1NiJ9"));
        assert!(!debug.contains("9876543210"));
        assert!(debug.contains("******3210"));
    }
}
