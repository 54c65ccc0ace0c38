use common_utils::consts;

impl Default for super::settings::Backend {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".into(),
            request_timeout_secs: consts::REQUEST_TIME_OUT,
        }
    }
}

impl Default for super::settings::SessionSettings {
    fn default() -> Self {
        Self {
            token_store_path: router_env::env::workspace_path()
                .join(".storefront")
                .join("session.json"),
        }
    }
}

impl Default for super::settings::CheckoutSettings {
    fn default() -> Self {
        Self {
            mode: Default::default(),
            redirect_target: Default::default(),
            return_url: "http://localhost:3000/payment-status".into(),
            session_lookup: Default::default(),
            hosted_page_url: None,
        }
    }
}

impl Default for super::settings::VerificationSettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 500,
        }
    }
}
