use std::path::PathBuf;

use config::{Environment, File};
use router_env::{config::Log, env, logger};
use serde::Deserialize;

use crate::core::errors::{ApplicationError, ApplicationResult};

#[derive(clap::Parser, Default)]
#[command(version, about)]
pub struct CmdLineConf {
    /// Config file.
    /// Application will look for "config/<RUN_ENV>.toml" if this option isn't specified.
    #[arg(short = 'f', long, value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Option<Subcommand>,
}

#[derive(clap::Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Subcommand {
    /// Sign in and remember the session
    Signin {
        /// Email address or mobile number
        #[arg(long)]
        identifier: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// List the available savings schemes
    Schemes,
    /// List your scheme enrollments
    MySchemes,
    /// Enroll in a scheme and pay the first installment
    Enroll {
        #[arg(long)]
        scheme_id: String,
        /// Monthly installment amount, e.g. 5000
        #[arg(long)]
        amount: String,
    },
    /// Pay a pending installment
    Pay {
        #[arg(long)]
        installment_id: String,
    },
    /// Confirm a payment completed on the hosted checkout
    Verify {
        #[arg(long)]
        installment_id: String,
        #[arg(long)]
        order_id: String,
        #[arg(long)]
        transaction_id: Option<String>,
    },
    /// Confirm a payment from the URL the hosted checkout returned to
    Resume {
        #[arg(long)]
        return_url: String,
        #[arg(long)]
        transaction_id: Option<String>,
    },
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub log: Log,
    pub backend: Backend,
    pub proxy: Proxy,
    pub session: SessionSettings,
    pub checkout: CheckoutSettings,
    pub verification: VerificationSettings,
}

/// The storefront REST backend
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Backend {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
    /// Comma separated hosts that are reached directly
    pub bypass_proxy_hosts: Option<String>,
}

/// Where the bearer token is persisted between runs
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionSettings {
    pub token_store_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CheckoutSettings {
    pub mode: CheckoutMode,
    pub redirect_target: RedirectTarget,
    /// Page the hosted checkout returns to. Order and installment ids are appended as query
    /// parameters.
    pub return_url: String,
    pub session_lookup: SessionLookup,
    /// Overrides the hosted checkout page of `mode`
    pub hosted_page_url: Option<String>,
}

/// Retry policy of installment verification
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct VerificationSettings {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
}

/// Which payment gateway environment the hosted checkout runs against
#[derive(
    Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CheckoutMode {
    #[default]
    Sandbox,
    Production,
}

/// How the hosted checkout is presented
#[derive(
    Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, strum::Display, strum::EnumString,
)]
pub enum RedirectTarget {
    /// Replace the current page
    #[default]
    #[serde(rename = "_self")]
    #[strum(serialize = "_self")]
    CurrentPage,
    /// Open over the current page
    #[serde(rename = "_modal")]
    #[strum(serialize = "_modal")]
    Modal,
}

/// How a payment session id is read out of backend order payloads.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionLookup {
    /// Only `{order_id, payment_session_id}`, flat or under `data`; anything else is an error
    Strict,
    /// Falls back to searching the payload for any known session id key
    #[default]
    Compatible,
}

impl Settings {
    pub fn new() -> ApplicationResult<Self> {
        Self::with_config_path(None)
    }

    /// Layers built-in defaults, the environment's config file (or `config_path`) and
    /// `STOREFRONT__*` environment variables, in that order.
    pub fn with_config_path(config_path: Option<PathBuf>) -> ApplicationResult<Self> {
        let environment = env::which();
        let config_path = router_env::Config::config_path(environment, config_path);

        let config = router_env::Config::builder(environment)?
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix("STOREFRONT")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?;

        #[allow(clippy::print_stderr)] // The logger has not yet been initialized
        let settings: Self = serde_path_to_error::deserialize(config).map_err(|error| {
            logger::error!(%error, "Unable to deserialize application configuration");
            eprintln!("Unable to deserialize application configuration: {error}");
            ApplicationError::from(error.into_inner())
        })?;

        Ok(settings)
    }

    pub fn validate(&self) -> ApplicationResult<()> {
        self.backend.validate()?;
        self.session.validate()?;
        self.checkout.validate()?;
        self.verification.validate()
    }
}

impl Backend {
    /// Absolute URL of a backend path such as `/schemes`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
