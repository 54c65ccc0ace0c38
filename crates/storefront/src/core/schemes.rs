use api_models::{
    scheme_payments::EnrollResponse,
    schemes::{EnrollRequest, Scheme, UserScheme},
    types::ListResponse,
};
use common_utils::{
    consts,
    types::{MajorUnit, ResourceId},
    validation,
};
use error_stack::{report, ResultExt};
use router_env::{instrument, logger, tracing, Flow};
use serde::Deserialize as _;

use crate::{
    core::errors::{StorefrontError, StorefrontResult, ValidationErrorExt},
    routes::AppState,
    services::{call_backend, call_backend_raw, AuthRequirement, BackendCall},
};

/// A fresh enrollment together with the raw payload it arrived in.
///
/// The payload may already carry the first installment's payment session.
#[derive(Clone, Debug)]
pub struct Enrollment {
    pub message: String,
    pub user_scheme: UserScheme,
    pub payload: serde_json::Value,
}

#[instrument(skip_all)]
pub async fn list_schemes(state: &AppState) -> StorefrontResult<Vec<Scheme>> {
    let schemes: ListResponse<Scheme> = call_backend(
        state,
        Flow::SchemesList,
        BackendCall::get("/schemes").auth(AuthRequirement::Optional),
    )
    .await?;
    Ok(schemes.into_inner())
}

#[instrument(skip_all, fields(scheme_id = %scheme_id))]
pub async fn get_scheme(state: &AppState, scheme_id: &ResourceId) -> StorefrontResult<Scheme> {
    call_backend(
        state,
        Flow::SchemesRetrieve,
        BackendCall::get(format!("/schemes/{scheme_id}")).auth(AuthRequirement::Optional),
    )
    .await
}

/// Enrollments of the signed in customer
#[instrument(skip_all)]
pub async fn my_schemes(state: &AppState) -> StorefrontResult<Vec<UserScheme>> {
    let user_schemes: ListResponse<UserScheme> =
        call_backend(state, Flow::UserSchemesList, BackendCall::get("/user-schemes")).await?;
    Ok(user_schemes.into_inner())
}

#[instrument(skip_all, fields(user_scheme_id = %user_scheme_id))]
pub async fn get_user_scheme(
    state: &AppState,
    user_scheme_id: &ResourceId,
) -> StorefrontResult<UserScheme> {
    let payload = call_backend_raw(
        state,
        Flow::UserSchemesRetrieve,
        BackendCall::get(format!("/user-schemes/{user_scheme_id}")),
    )
    .await?;
    read_user_scheme(&payload)
        .ok_or_else(|| report!(StorefrontError::UnexpectedResponse))
        .attach_printable("user scheme response has no enrollment")
}

/// Checks a monthly amount before anything is sent: it must be positive and, when the scheme
/// is known, at least the scheme's minimum.
pub fn validate_monthly_amount(
    monthly_amount: MajorUnit,
    scheme: Option<&Scheme>,
) -> StorefrontResult<()> {
    let minimum = scheme.and_then(|scheme| scheme.min_amount);
    if !monthly_amount.is_positive() {
        return Err(report!(StorefrontError::Validation {
            message: "Please enter a valid monthly amount".to_string(),
        }));
    }
    validation::validate_range(
        "Monthly amount",
        monthly_amount.get_amount_as_decimal(),
        minimum.map(MajorUnit::get_amount_as_decimal),
        None,
    )
    .to_validation_failed()
}

/// Enrolls the signed in customer in a scheme.
///
/// Signed out customers get [`StorefrontError::Unauthenticated`] before any request is sent.
#[instrument(skip_all, fields(scheme_id = %scheme_id, monthly_amount = %monthly_amount))]
pub async fn enroll(
    state: &AppState,
    scheme_id: ResourceId,
    monthly_amount: MajorUnit,
    scheme: Option<&Scheme>,
) -> StorefrontResult<Enrollment> {
    state.session.require_token()?;
    validate_monthly_amount(monthly_amount, scheme)?;

    let payload = call_backend_raw(
        state,
        Flow::SchemeEnroll,
        BackendCall::post("/user-schemes/enroll").json(EnrollRequest {
            scheme_id,
            monthly_amount,
        }),
    )
    .await?;

    let response = serde_json::from_value::<EnrollResponse>(payload.clone())
        .change_context(StorefrontError::UnexpectedResponse)
        .attach_printable("Unable to parse enrollment response")?;
    let user_scheme = response
        .user_scheme
        .or_else(|| read_user_scheme(&payload))
        .ok_or_else(|| report!(StorefrontError::UnexpectedResponse))
        .attach_printable("enrollment response has no user scheme")?;

    let message = response
        .message
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| consts::ENROLLMENT_SUCCESS_MESSAGE.to_string());
    logger::info!(user_scheme_id = %user_scheme.id, status = %user_scheme.status, "Enrolled in scheme");

    Ok(Enrollment {
        message,
        user_scheme,
        payload,
    })
}

/// An enrollment sent bare, under `data`, or under `user_scheme`
fn read_user_scheme(payload: &serde_json::Value) -> Option<UserScheme> {
    [
        Some(payload),
        payload.get("data"),
        payload.get("user_scheme"),
        payload.get("userScheme"),
        payload.get("data").and_then(|data| data.get("user_scheme")),
    ]
    .into_iter()
    .flatten()
    .find_map(|candidate| UserScheme::deserialize(candidate).ok())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn monthly_amount_must_be_positive_and_reach_the_minimum() {
        let scheme: Scheme = serde_json::from_value(json!({
            "id": 3,
            "name": "Swarna Nidhi",
            "min_monthly_amount": 1000
        }))
        .unwrap();

        assert!(validate_monthly_amount(MajorUnit::from(5000_i64), Some(&scheme)).is_ok());
        assert!(validate_monthly_amount(MajorUnit::from(5000_i64), None).is_ok());

        let below_minimum =
            validate_monthly_amount(MajorUnit::from(500_i64), Some(&scheme)).unwrap_err();
        assert_eq!(
            below_minimum.current_context(),
            &StorefrontError::Validation {
                message: "Monthly amount must be at least 1000".to_string()
            }
        );
        assert!(validate_monthly_amount(MajorUnit::zero(), None).is_err());
    }

    #[test]
    fn user_scheme_is_found_in_wrapped_payloads() {
        let enrollment = json!({"id": 41, "monthly_amount": 5000, "status": "pending"});
        for payload in [
            enrollment.clone(),
            json!({"data": enrollment.clone()}),
            json!({"success": true, "userScheme": enrollment.clone()}),
            json!({"data": {"user_scheme": enrollment.clone()}}),
        ] {
            let user_scheme = read_user_scheme(&payload).unwrap();
            assert_eq!(user_scheme.id, ResourceId::from(41_u64));
        }
        assert!(read_user_scheme(&json!({"message": "ok"})).is_none());
    }
}
