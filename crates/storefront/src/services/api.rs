pub mod client;

use std::{error::Error, time::Duration};

use common_utils::{
    consts,
    ext_traits::Encode,
    request::{Method, Request, RequestBuilder, RequestContent},
};
use error_stack::ResultExt;
use router_env::{instrument, logger, tracing, Flow, Tag};
use serde::de::DeserializeOwned;

use self::client::HeaderExt;
use crate::{
    configs::settings::Proxy,
    core::errors::{
        ApiClientError, ApiClientErrorExt, CustomResult, StorefrontError, StorefrontResult,
    },
    routes::AppState,
};

/// Whether a backend call carries the customer's bearer token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthRequirement {
    /// Fails with `Unauthenticated` before anything is sent when signed out
    Required,
    /// Sent when signed in
    Optional,
    /// Never sent
    None,
}

/// One call to the storefront backend
#[derive(Debug)]
pub struct BackendCall {
    pub method: Method,
    pub path: String,
    pub auth: AuthRequirement,
    pub query: Option<String>,
    pub body: Option<RequestContent>,
}

impl BackendCall {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            auth: AuthRequirement::Required,
            query: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn auth(mut self, auth: AuthRequirement) -> Self {
        self.auth = auth;
        self
    }

    pub fn json<T>(mut self, body: T) -> Self
    where
        T: serde::Serialize + Send + 'static,
    {
        self.body = Some(RequestContent::Json(Box::new(body)));
        self
    }

    /// Appends `query` as a url-encoded query string
    pub fn query<Q>(mut self, query: &Q) -> StorefrontResult<Self>
    where
        Q: serde::Serialize + std::fmt::Debug,
    {
        let encoded = query.url_encode().change_context(StorefrontError::Validation {
            message: "Invalid search parameters".to_string(),
        })?;
        self.query = (!encoded.is_empty()).then_some(encoded);
        Ok(self)
    }
}

#[instrument(skip_all)]
pub async fn send_request(
    client_proxy: &Proxy,
    request: Request,
    option_timeout_secs: Option<u64>,
) -> CustomResult<reqwest::Response, ApiClientError> {
    let masked_payload = request
        .body
        .as_ref()
        .map(RequestContent::get_inner_value)
        .transpose()
        .unwrap_or_default();
    logger::info!(
        tag = ?Tag::ApiOutgoingRequest,
        method = ?request.method,
        url = %request.url,
        headers = ?request.headers,
        payload = ?masked_payload,
    );

    let url = url::Url::parse(&request.url).change_context(ApiClientError::UrlParsingFailed)?;
    let client = client::create_client(client_proxy)?;
    let headers = request.headers.construct_header_map()?;

    let request = {
        let builder = match request.method {
            Method::Get => client.get(url),
            Method::Post => client.post(url),
            Method::Put => client.put(url),
            Method::Delete => client.delete(url),
        };
        match request.body {
            Some(RequestContent::Json(payload)) => builder.json(&payload),
            None => builder,
        }
        .headers(headers)
        .timeout(Duration::from_secs(
            option_timeout_secs.unwrap_or(consts::REQUEST_TIME_OUT),
        ))
    };

    request
        .send()
        .await
        .map_err(map_send_error)
        .attach_printable("Unable to send request to the storefront backend")
}

fn map_send_error(error: reqwest::Error) -> ApiClientError {
    match error {
        error if error.is_timeout() => ApiClientError::RequestTimeoutReceived,
        error if is_connection_closed_before_message_could_complete(&error) => {
            ApiClientError::ConnectionClosedIncompleteMessage
        }
        _ => ApiClientError::RequestNotSent(error.to_string()),
    }
}

fn is_connection_closed_before_message_could_complete(error: &reqwest::Error) -> bool {
    let mut source = error.source();
    while let Some(err) = source {
        if let Some(hyper_err) = err.downcast_ref::<hyper::Error>() {
            if hyper_err.is_incomplete_message() {
                return true;
            }
        }
        source = err.source();
    }
    false
}

/// Sends `call` to the backend and decodes a successful answer as `Res`.
///
/// Non-success statuses become [`StorefrontError::Backend`] carrying the backend's own message;
/// `401` becomes [`StorefrontError::Unauthenticated`] and ends the stale session.
#[instrument(skip_all, fields(flow = %flow, path = %call.path))]
pub async fn call_backend<Res>(state: &AppState, flow: Flow, call: BackendCall) -> StorefrontResult<Res>
where
    Res: DeserializeOwned,
{
    let body = call_backend_raw(state, flow, call).await?;
    serde_json::from_value::<Res>(body)
        .change_context(StorefrontError::UnexpectedResponse)
        .attach_printable_lazy(|| {
            format!("Unable to parse {} response", std::any::type_name::<Res>())
        })
}

/// Like [`call_backend`], returning the JSON body as is. An empty body reads as `{}`.
pub async fn call_backend_raw(
    state: &AppState,
    flow: Flow,
    call: BackendCall,
) -> StorefrontResult<serde_json::Value> {
    let authorization = match call.auth {
        AuthRequirement::Required => {
            state.session.require_token()?;
            state.session.authorization_header()
        }
        AuthRequirement::Optional => state.session.authorization_header(),
        AuthRequirement::None => None,
    };

    let mut url = state.conf.backend.endpoint(&call.path);
    if let Some(query) = &call.query {
        url.push('?');
        url.push_str(query);
    }

    let mut builder = RequestBuilder::new()
        .method(call.method)
        .url(&url)
        .attach_default_headers()
        .headers(authorization.into_iter().collect());
    if let Some(body) = call.body {
        builder = builder.set_body(body);
    }

    let response = send_request(
        &state.conf.proxy,
        builder.build(),
        Some(state.conf.backend.request_timeout_secs),
    )
    .await
    .map_err(ApiClientErrorExt::to_storefront_error)?;

    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .change_context(ApiClientError::ResponseDecodingFailed)
        .map_err(ApiClientErrorExt::to_storefront_error)?;

    logger::info!(
        tag = ?Tag::ApiIncomingResponse,
        flow = %flow,
        status = status.as_u16(),
    );

    if status.is_success() {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::Value::Object(serde_json::Map::new()));
        }
        return serde_json::from_slice(&bytes)
            .change_context(StorefrontError::UnexpectedResponse)
            .attach_printable_lazy(|| {
                format!(
                    "Response body is not JSON: {}",
                    String::from_utf8_lossy(&bytes)
                )
            });
    }

    let message = extract_error_message(&bytes);
    logger::warn!(status = status.as_u16(), %message, "Backend rejected the request");

    if status == reqwest::StatusCode::UNAUTHORIZED {
        if call.auth != AuthRequirement::None {
            state.session.logout()?;
        }
        return Err(error_stack::report!(StorefrontError::unauthenticated()))
            .attach_printable(message);
    }

    Err(error_stack::report!(StorefrontError::Backend {
        status: status.as_u16(),
        message,
    }))
}

/// Reads `message`, then `error`, then `detail` from an error body, else a generic fallback
pub fn extract_error_message(body: &[u8]) -> String {
    fn read(value: &serde_json::Value) -> Option<String> {
        match value {
            serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            serde_json::Value::Object(map) => ["message", "error", "detail"]
                .iter()
                .find_map(|key| map.get(*key).and_then(read)),
            serde_json::Value::Array(items) => items.iter().find_map(read),
            _ => None,
        }
    }

    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| match value {
            serde_json::Value::Object(_) => read(value),
            _ => None,
        })
        .unwrap_or_else(|| consts::GENERIC_ERROR_MESSAGE.to_string())
}
