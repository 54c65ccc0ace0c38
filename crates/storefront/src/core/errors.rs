pub mod utils;

pub use common_utils::errors::{CustomResult, ParsingError, ValidationError};
use common_utils::consts;

pub use self::utils::{ApiClientErrorExt, ValidationErrorExt};

pub type StorefrontResult<T> = CustomResult<T, StorefrontError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Failures while starting the client, before any flow runs
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("Application configuration error: {0}")]
    ConfigurationError(#[from] config::ConfigError),

    #[error("Invalid configuration value provided: {0}")]
    InvalidConfigurationValueError(String),

    #[error("Unable to initialize the logger: {0}")]
    LoggerInitializationError(String),

    #[error("I/O: {0}")]
    IoError(#[from] std::io::Error),
}

/// Transport level failures of the HTTP client
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiClientError {
    #[error("Header map construction failed")]
    HeaderMapConstructionFailed,
    #[error("Invalid proxy configuration")]
    InvalidProxyConfiguration,
    #[error("Client construction failed")]
    ClientConstructionFailed,
    #[error("URL encoding of request payload failed")]
    UrlEncodingFailed,
    #[error("Failed to parse the request URL")]
    UrlParsingFailed,
    #[error("Failed to send request to the backend: {0}")]
    RequestNotSent(String),
    #[error("Failed to decode response")]
    ResponseDecodingFailed,
    #[error("Server responded with Request Timeout")]
    RequestTimeoutReceived,
    #[error("connection closed before a message could complete")]
    ConnectionClosedIncompleteMessage,
}

impl ApiClientError {
    /// Whether the failure happened on the network rather than while preparing the request
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            Self::RequestNotSent(_)
                | Self::RequestTimeoutReceived
                | Self::ConnectionClosedIncompleteMessage
                | Self::ResponseDecodingFailed
        )
    }
}

/// Everything a storefront flow can fail with, grouped the way the front end reacts to it
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorefrontError {
    /// The customer must sign in; the front end navigates to `redirect_to`.
    #[error("Authentication required")]
    Unauthenticated { redirect_to: String },

    /// A form field is missing or invalid. Nothing was sent to the backend.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// The backend answered with a non-success status.
    #[error("Backend rejected the request ({status}): {message}")]
    Backend { status: u16, message: String },

    /// The backend could not be reached or its answer could not be read.
    #[error("Network failure: {message}")]
    Network { message: String },

    /// The backend answered successfully with a body that could not be understood.
    #[error("Unexpected response from the backend")]
    UnexpectedResponse,

    /// The hosted checkout reported a failed or abandoned payment.
    #[error("Payment gateway failure: {message}")]
    Gateway { message: String },

    /// No payment session could be obtained for the installment.
    #[error("Payment session unavailable")]
    SessionUnavailable,

    /// A checkout return URL did not carry the order and installment ids.
    #[error("Invalid checkout return URL")]
    InvalidReturnUrl,

    /// The client is misconfigured.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Reading or writing the persisted token failed.
    #[error("Token store failure")]
    TokenStore,
}

impl StorefrontError {
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated {
            redirect_to: consts::SIGNIN_ROUTE.to_string(),
        }
    }

    /// Text the front end shows to the customer
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthenticated { .. } => "Please sign in to continue".to_string(),
            Self::Validation { message }
            | Self::Backend { message, .. }
            | Self::Gateway { message } => message.clone(),
            Self::SessionUnavailable => {
                "Unable to start the payment. Please try again.".to_string()
            }
            Self::InvalidReturnUrl => {
                "We could not confirm this payment. Please contact support.".to_string()
            }
            Self::Network { .. }
            | Self::UnexpectedResponse
            | Self::Configuration(_)
            | Self::TokenStore => {
                consts::GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }

    /// Network class failures may succeed when repeated; backend rejections never do.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Where the front end navigates in response, if anywhere
    pub fn redirect_to(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated { redirect_to } => Some(redirect_to.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages() {
        assert_eq!(
            StorefrontError::unauthenticated().redirect_to(),
            Some("/signin")
        );
        assert_eq!(
            StorefrontError::Backend {
                status: 422,
                message: "Minimum amount is 1000".to_string()
            }
            .user_message(),
            "Minimum amount is 1000"
        );
        assert_eq!(
            StorefrontError::Network {
                message: "connection refused".to_string()
            }
            .user_message(),
            consts::GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn only_network_failures_are_retryable() {
        assert!(StorefrontError::Network {
            message: "timeout".to_string()
        }
        .is_retryable());
        assert!(!StorefrontError::Backend {
            status: 500,
            message: "oops".to_string()
        }
        .is_retryable());
        assert!(!StorefrontError::SessionUnavailable.is_retryable());
    }
}
