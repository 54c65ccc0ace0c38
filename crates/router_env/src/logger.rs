//!
//! Logger of the storefront client.
//!

#[doc(inline)]
pub use crate::logger::{
    config::Config,
    setup::{setup, TelemetryGuard},
    types::{Flow, Level, Tag},
};

pub mod config;
pub mod setup;
pub mod types;

pub use tracing::{debug, error, event as log, info, trace, warn};
