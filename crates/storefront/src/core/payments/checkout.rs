//! Hosted checkout: the gateway page that owns the whole payment UI.

use async_trait::async_trait;
use common_utils::types::ResourceId;
use error_stack::{report, ResultExt};
use router_env::{logger, Tag};
use serde_json::Value;

use super::session::TRANSACTION_ID_KEYS;
use crate::{
    configs::settings::{CheckoutMode, CheckoutSettings, RedirectTarget},
    core::errors::{StorefrontError, StorefrontResult},
};

const SANDBOX_HOSTED_PAGE_URL: &str = "https://payments-test.cashfree.com/order/";
const PRODUCTION_HOSTED_PAGE_URL: &str = "https://payments.cashfree.com/order/";

const ORDER_ID_PARAM: &str = "order_id";
const INSTALLMENT_ID_PARAM: &str = "installment_id";

/// What the hosted checkout is opened with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub payment_session_id: String,
    pub order_id: String,
    pub installment_id: ResourceId,
    pub mode: CheckoutMode,
    pub redirect_target: RedirectTarget,
    /// Carries `order_id` and `installment_id` so verification can resume after a reload
    pub return_url: url::Url,
}

/// How a hosted checkout ended, as far as the client can observe
#[derive(Clone, Debug, PartialEq)]
pub enum CheckoutOutcome {
    /// The gateway reported success; the payload is whatever its callback carried
    Success(Value),
    /// The customer abandoned the payment or the gateway declined it
    Failure { message: String },
    /// The page was navigated away to the checkout; the result arrives on the return URL
    Redirected { checkout_url: url::Url },
}

/// Opens the payment gateway's checkout for one payment session
#[async_trait]
pub trait CheckoutLauncher: Send + Sync {
    async fn launch(&self, request: &CheckoutRequest) -> StorefrontResult<CheckoutOutcome>;
}

/// Sends the customer to the gateway's hosted checkout page.
///
/// The outcome is always [`CheckoutOutcome::Redirected`]; the payment result comes back on the
/// return URL.
#[derive(Clone, Debug, Default)]
pub struct HostedPageLauncher {
    hosted_page_url: Option<String>,
}

impl HostedPageLauncher {
    pub fn new(settings: &CheckoutSettings) -> Self {
        Self {
            hosted_page_url: settings.hosted_page_url.clone(),
        }
    }

    pub fn checkout_url(&self, request: &CheckoutRequest) -> StorefrontResult<url::Url> {
        let base = self
            .hosted_page_url
            .as_deref()
            .unwrap_or(match request.mode {
                CheckoutMode::Sandbox => SANDBOX_HOSTED_PAGE_URL,
                CheckoutMode::Production => PRODUCTION_HOSTED_PAGE_URL,
            });

        let mut checkout_url = url::Url::parse(base)
            .change_context(StorefrontError::Configuration(
                "hosted checkout page URL is not a valid URL".to_string(),
            ))
            .attach_printable_lazy(|| format!("hosted page URL: {base}"))?;
        checkout_url
            .query_pairs_mut()
            .append_pair("payment_session_id", &request.payment_session_id)
            .append_pair("redirect_target", &request.redirect_target.to_string())
            .append_pair("return_url", request.return_url.as_str());
        Ok(checkout_url)
    }
}

#[async_trait]
impl CheckoutLauncher for HostedPageLauncher {
    async fn launch(&self, request: &CheckoutRequest) -> StorefrontResult<CheckoutOutcome> {
        let checkout_url = self.checkout_url(request)?;
        logger::info!(
            tag = ?Tag::InitiatedToGateway,
            order_id = %request.order_id,
            installment_id = %request.installment_id,
            mode = %request.mode,
            "Redirecting to hosted checkout"
        );
        Ok(CheckoutOutcome::Redirected { checkout_url })
    }
}

/// `return_url` with the order and installment ids appended
pub fn build_return_url(
    return_url: &str,
    order_id: &str,
    installment_id: &ResourceId,
) -> StorefrontResult<url::Url> {
    let mut url = url::Url::parse(return_url)
        .change_context(StorefrontError::Configuration(
            "checkout return URL is not a valid URL".to_string(),
        ))
        .attach_printable_lazy(|| format!("return URL: {return_url}"))?;
    url.query_pairs_mut()
        .append_pair(ORDER_ID_PARAM, order_id)
        .append_pair(INSTALLMENT_ID_PARAM, installment_id.as_str());
    Ok(url)
}

/// Ids carried back by the hosted checkout on the return URL
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnParams {
    pub order_id: String,
    pub installment_id: ResourceId,
    /// Present when the gateway appended its own payment id
    pub transaction_id: Option<String>,
}

pub fn parse_return_url(return_url: &str) -> StorefrontResult<ReturnParams> {
    let url = url::Url::parse(return_url)
        .change_context(StorefrontError::InvalidReturnUrl)
        .attach_printable_lazy(|| format!("return URL: {return_url}"))?;

    let param = |name: &str| {
        url.query_pairs()
            .find(|(key, value)| key == name && !value.trim().is_empty())
            .map(|(_, value)| value.trim().to_string())
    };

    let order_id = param(ORDER_ID_PARAM)
        .ok_or_else(|| report!(StorefrontError::InvalidReturnUrl))
        .attach_printable("return URL has no order id")?;
    let installment_id = param(INSTALLMENT_ID_PARAM)
        .ok_or_else(|| report!(StorefrontError::InvalidReturnUrl))
        .attach_printable("return URL has no installment id")?
        .parse::<ResourceId>()
        .change_context(StorefrontError::InvalidReturnUrl)?;
    let transaction_id = TRANSACTION_ID_KEYS.into_iter().find_map(param);

    logger::info!(
        tag = ?Tag::GatewayCallback,
        %order_id,
        %installment_id,
        "Checkout return URL received"
    );
    Ok(ReturnParams {
        order_id,
        installment_id,
        transaction_id,
    })
}
