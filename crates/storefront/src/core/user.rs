use api_models::user::{AuthResponse, SignupForm, User};
use error_stack::{report, ResultExt};
use masking::Secret;
use router_env::{instrument, logger, tracing, Flow};
use serde::Deserialize as _;

use crate::{
    core::{
        errors::{StorefrontError, StorefrontResult},
        forms,
    },
    routes::AppState,
    services::{call_backend, call_backend_raw, AuthRequirement, BackendCall},
};

/// Signs in with an email address or mobile number and starts a session with the returned
/// token
#[instrument(skip_all)]
pub async fn signin(
    state: &AppState,
    identifier: Option<&str>,
    password: Option<&Secret<String>>,
) -> StorefrontResult<AuthResponse> {
    let request = forms::validate_signin(identifier, password)?;
    let response: AuthResponse = call_backend(
        state,
        Flow::Signin,
        BackendCall::post("/auth/login")
            .auth(AuthRequirement::None)
            .json(request),
    )
    .await?;

    state.session.set_token(response.token.clone())?;
    logger::info!("Signed in");
    Ok(response)
}

#[instrument(skip_all)]
pub async fn signup(state: &AppState, form: &SignupForm) -> StorefrontResult<AuthResponse> {
    let request = forms::validate_signup(form)?;
    let response: AuthResponse = call_backend(
        state,
        Flow::Signup,
        BackendCall::post("/auth/register")
            .auth(AuthRequirement::None)
            .json(request),
    )
    .await?;

    state.session.set_token(response.token.clone())?;
    logger::info!("Account created");
    Ok(response)
}

/// The signed in customer, sent bare or under `user`
#[instrument(skip_all)]
pub async fn profile(state: &AppState) -> StorefrontResult<User> {
    let payload = call_backend_raw(state, Flow::ProfileRetrieve, BackendCall::get("/auth/profile")).await?;
    let user = [payload.get("user"), payload.get("data"), Some(&payload)]
        .into_iter()
        .flatten()
        .find_map(|candidate| User::deserialize(candidate).ok())
        .ok_or_else(|| report!(StorefrontError::UnexpectedResponse))
        .attach_printable("profile response has no user");
    user
}

pub fn logout(state: &AppState) -> StorefrontResult<()> {
    state.session.logout()?;
    logger::info!("Signed out");
    Ok(())
}
