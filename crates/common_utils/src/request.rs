//! Outgoing request model shared by the storefront HTTP client.

use masking::Maskable;
use serde::{Deserialize, Serialize};

use crate::consts;

/// Request headers, with sensitive values kept masked
pub type Headers = std::collections::HashSet<(String, Maskable<String>)>;

/// HTTP method of an outgoing request
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

fn default_request_headers() -> [(String, Maskable<String>); 2] {
    use http::header;

    [
        (header::VIA.to_string(), consts::USER_AGENT_TAG.into()),
        (header::ACCEPT.to_string(), "application/json".into()),
    ]
}

/// A fully built request, ready to be handed to the HTTP client
#[derive(Debug)]
pub struct Request {
    /// Absolute URL
    pub url: String,
    /// Headers to attach
    pub headers: Headers,
    /// HTTP method
    pub method: Method,
    /// Optional body
    pub body: Option<RequestContent>,
}

/// Body of an outgoing request
pub enum RequestContent {
    /// Serialized as JSON
    Json(Box<dyn masking::ErasedMaskSerialize + Send>),
}

impl std::fmt::Debug for RequestContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Json(_) => "JsonRequestBody",
        })
    }
}

impl RequestContent {
    /// The body as JSON with every secret masked, suitable for logging
    pub fn get_inner_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Json(inner) => inner.masked_serialize(),
        }
    }
}

/// Builder for [`Request`]
#[derive(Debug)]
pub struct RequestBuilder {
    /// Absolute URL
    pub url: String,
    /// Headers to attach
    pub headers: Headers,
    /// HTTP method
    pub method: Method,
    /// Optional body
    pub body: Option<RequestContent>,
}

impl RequestBuilder {
    /// Creates a GET builder with an empty URL
    pub fn new() -> Self {
        Self {
            method: Method::Get,
            url: String::with_capacity(256),
            headers: std::collections::HashSet::new(),
            body: None,
        }
    }

    /// Sets the URL
    pub fn url(mut self, url: &str) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the method
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Extends the headers with the default request headers
    pub fn attach_default_headers(mut self) -> Self {
        self.headers.extend(default_request_headers());
        self
    }

    /// Extends the headers
    pub fn headers(mut self, headers: Vec<(String, Maskable<String>)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the body
    pub fn set_body<T: Into<RequestContent>>(mut self, body: T) -> Self {
        self.body.replace(body.into());
        self
    }

    /// Finishes the request
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
