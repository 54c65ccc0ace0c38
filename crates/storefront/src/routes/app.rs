use std::sync::Arc;

use router_env::logger;

use crate::{
    configs::settings::Settings,
    core::{errors::StorefrontResult, payments::verification::VerificationLedger},
    services::authentication::{FileTokenStore, Session, TokenStore},
};

/// Everything a storefront flow needs, shared by reference between flows
#[derive(Debug, Clone)]
pub struct AppState {
    pub conf: Arc<Settings>,
    pub session: Arc<Session>,
    pub verification_ledger: Arc<VerificationLedger>,
}

impl AppState {
    /// Restores the persisted session from the token file named in `conf`
    pub fn new(conf: Settings) -> StorefrontResult<Self> {
        let store = FileTokenStore::new(&conf.session.token_store_path);
        Self::with_token_store(conf, Box::new(store))
    }

    pub fn with_token_store(conf: Settings, store: Box<dyn TokenStore>) -> StorefrontResult<Self> {
        let session = Session::restore(store)?;
        logger::debug!(backend = %conf.backend.base_url, "Application state created");
        Ok(Self {
            conf: Arc::new(conf),
            session: Arc::new(session),
            verification_ledger: Arc::new(VerificationLedger::default()),
        })
    }
}
