//! Commonly used constants

/// Default timeout, in seconds, for a request to the storefront backend
pub const REQUEST_TIME_OUT: u64 = 30;

/// Route the front end navigates to when a call needs an authenticated customer
pub const SIGNIN_ROUTE: &str = "/signin";

/// Route the front end navigates to once an installment is verified
pub const PROFILE_ROUTE: &str = "/profile";

/// Shown when the backend rejects a call without a message of its own
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Shown after a successful enrollment when the backend sends no message
pub const ENROLLMENT_SUCCESS_MESSAGE: &str = "Enrolled successfully";

/// Shown after an installment payment is verified when the backend sends no message
pub const PAYMENT_SUCCESS_MESSAGE: &str = "Payment verified successfully";

/// Value of the `Via` header attached to every outgoing request
pub const USER_AGENT_TAG: &str = "storefront-client";

/// Maximum length accepted for an email address
pub const EMAIL_MAX_LENGTH: usize = 319;
