//! Types.

use serde::Deserialize;
use strum::{Display, EnumString};
pub use tracing::{
    field::{Field, Visit},
    Level, Value,
};

/// Category and tag of log event.
///
/// Don't hesitate to add your variant if it is missing here.
#[derive(Debug, Default, Deserialize, Clone, Display, EnumString)]
pub enum Tag {
    /// General.
    #[default]
    General,

    /// API: outgoing request to the storefront backend.
    ApiOutgoingRequest,
    /// API: response received from the storefront backend.
    ApiIncomingResponse,

    /// Token store: read.
    TokenStoreRead,
    /// Token store: write.
    TokenStoreWrite,

    /// Hosted checkout handed over to the payment gateway.
    InitiatedToGateway,
    /// Payment gateway returned control to the client.
    GatewayCallback,

    /// Event: general.
    Event,
}

/// Client flows. Every outgoing backend call is tagged with one of these.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Sign in with email or mobile and password
    Signin,
    /// Create a customer account
    Signup,
    /// Fetch the signed in customer's profile
    ProfileRetrieve,
    /// List available savings schemes
    SchemesList,
    /// Retrieve a single savings scheme
    SchemesRetrieve,
    /// Enroll into a savings scheme
    SchemeEnroll,
    /// List the customer's scheme enrollments
    UserSchemesList,
    /// Retrieve a single scheme enrollment
    UserSchemesRetrieve,
    /// Create a gateway order for a specific installment
    InstallmentOrderCreate,
    /// Hosted checkout for an installment
    InstallmentCheckout,
    /// Verify an installment payment with the backend
    InstallmentVerify,
    /// Product listing and detail
    CatalogRetrieve,
    /// Cart operations
    Cart,
    /// Wishlist operations
    Wishlist,
    /// Place an order from the checkout form
    OrdersCreate,
    /// List or retrieve orders
    OrdersRetrieve,
    /// Cancel an order
    OrdersCancel,
    /// Custom order requests
    CustomOrders,
    /// Wallet balance and transactions
    Wallet,
    /// Gold vault holdings
    GoldVault,
    /// Notifications inbox and device registration
    Notifications,
    /// Current gold rates
    GoldRatesRetrieve,
    /// Admin console calls
    Admin,
}
