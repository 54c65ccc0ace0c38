use std::time::Duration;

use error_stack::ResultExt;
use masking::{Maskable, PeekInterface};
use once_cell::sync::OnceCell;
use reqwest::header::{HeaderName, HeaderValue};

use crate::{
    configs::settings::Proxy,
    core::errors::{ApiClientError, CustomResult},
};

static NON_PROXIED_CLIENT: OnceCell<reqwest::Client> = OnceCell::new();
static PROXIED_CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

fn get_client_builder(proxy_config: &Proxy) -> CustomResult<reqwest::ClientBuilder, ApiClientError> {
    let mut client_builder = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(
            proxy_config
                .idle_pool_connection_timeout
                .unwrap_or_default(),
        ));

    let proxy_exclusion_config =
        reqwest::NoProxy::from_string(&proxy_config.bypass_proxy_hosts.clone().unwrap_or_default());

    // Proxy all HTTPS traffic through the configured HTTPS proxy
    if let Some(url) = proxy_config.https_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::https(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .attach_printable("HTTPS proxy configuration error")?
                .no_proxy(proxy_exclusion_config.clone()),
        );
    }

    // Proxy all HTTP traffic through the configured HTTP proxy
    if let Some(url) = proxy_config.http_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::http(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .attach_printable("HTTP proxy configuration error")?
                .no_proxy(proxy_exclusion_config),
        );
    }

    Ok(client_builder)
}

// We may need to use outbound proxy to connect to external world.
// Precedence will be the environment variables, followed by the config.
pub(super) fn create_client(proxy_config: &Proxy) -> CustomResult<reqwest::Client, ApiClientError> {
    Ok(
        if proxy_config.http_url.is_none() && proxy_config.https_url.is_none() {
            &NON_PROXIED_CLIENT
        } else {
            &PROXIED_CLIENT
        }
        .get_or_try_init(|| {
            get_client_builder(proxy_config)?
                .build()
                .change_context(ApiClientError::ClientConstructionFailed)
                .attach_printable("Failed to construct base client")
        })?
        .clone(),
    )
}

pub(super) trait HeaderExt {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError>;
}

impl HeaderExt for common_utils::request::Headers {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError> {
        self.into_iter().try_fold(
            reqwest::header::HeaderMap::new(),
            |mut header_map, (header_name, header_value)| {
                let header_name = HeaderName::from_bytes(header_name.as_bytes())
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                let header_value = match header_value {
                    Maskable::Masked(secret) => {
                        let mut value = HeaderValue::from_str(secret.peek())
                            .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                        value.set_sensitive(true);
                        value
                    }
                    Maskable::Normal(value) => HeaderValue::from_str(&value)
                        .change_context(ApiClientError::HeaderMapConstructionFailed)?,
                };
                header_map.append(header_name, header_value);
                Ok(header_map)
            },
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use masking::Mask;

    use super::*;

    #[test]
    fn masked_headers_are_marked_sensitive() {
        let headers: common_utils::request::Headers = [
            ("accept".to_string(), "application/json".into()),
            (
                "authorization".to_string(),
                "Bearer abc".to_string().into_masked(),
            ),
        ]
        .into_iter()
        .collect();

        let header_map = headers.construct_header_map().unwrap();
        assert!(header_map.get("authorization").unwrap().is_sensitive());
        assert!(!header_map.get("accept").unwrap().is_sensitive());
    }

    #[test]
    fn invalid_proxy_is_reported() {
        let proxy = Proxy {
            https_url: Some("::not a proxy::".to_string()),
            ..Proxy::default()
        };
        let error = get_client_builder(&proxy).unwrap_err();
        assert_eq!(
            error.current_context(),
            &ApiClientError::InvalidProxyConfiguration
        );
    }
}
