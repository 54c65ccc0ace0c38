//! The customer's authenticated session and the store its bearer token is persisted in.

use std::{
    path::PathBuf,
    sync::{Mutex, PoisonError, RwLock},
};

use error_stack::ResultExt;
use masking::{ExposeInterface, Mask, Maskable, PeekInterface, Secret, ZeroizableSecret};
use router_env::{logger, Tag};
use serde::{Deserialize, Serialize};

use crate::core::errors::{StorefrontError, StorefrontResult};

/// Client storage for the bearer token
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    fn load(&self) -> StorefrontResult<Option<Secret<String>>>;
    fn save(&self, token: &Secret<String>) -> StorefrontResult<()>;
    fn clear(&self) -> StorefrontResult<()>;
}

#[derive(Serialize, Deserialize)]
struct PersistedSession {
    token: Secret<String>,
}

/// Keeps the token in a small JSON file, e.g. `.storefront/session.json`
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> StorefrontResult<Option<Secret<String>>> {
        let contents = match std::fs::read(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(error)
                    .change_context(StorefrontError::TokenStore)
                    .attach_printable_lazy(|| format!("Unable to read {}", self.path.display()))
            }
        };

        logger::debug!(tag = ?Tag::TokenStoreRead, path = %self.path.display());
        match serde_json::from_slice::<PersistedSession>(&contents) {
            Ok(session) if !session.token.peek().trim().is_empty() => Ok(Some(session.token)),
            Ok(_) => Ok(None),
            Err(error) => {
                // a corrupt file is treated as signed out
                logger::warn!(%error, path = %self.path.display(), "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, token: &Secret<String>) -> StorefrontResult<()> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .change_context(StorefrontError::TokenStore)
                .attach_printable_lazy(|| format!("Unable to create {}", parent.display()))?;
        }
        let contents = serde_json::to_vec(&PersistedSession {
            token: token.clone(),
        })
        .change_context(StorefrontError::TokenStore)?;

        logger::debug!(tag = ?Tag::TokenStoreWrite, path = %self.path.display());
        std::fs::write(&self.path, contents)
            .change_context(StorefrontError::TokenStore)
            .attach_printable_lazy(|| format!("Unable to write {}", self.path.display()))
    }

    fn clear(&self) -> StorefrontResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error)
                .change_context(StorefrontError::TokenStore)
                .attach_printable_lazy(|| format!("Unable to remove {}", self.path.display())),
        }
    }
}

/// Token storage that lives as long as the process
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: Mutex<Option<Secret<String>>>,
}

impl InMemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(Secret::new(token.into()))),
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> StorefrontResult<Option<Secret<String>>> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &Secret<String>) -> StorefrontResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> StorefrontResult<()> {
        if let Some(mut token) = self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            token.zeroize();
        }
        Ok(())
    }
}

/// The signed in customer's session.
///
/// Created once at start-up with [`Session::restore`] and shared by reference with every
/// flow. [`Session::logout`] wipes the token from memory and from the store.
#[derive(Debug)]
pub struct Session {
    token: RwLock<Option<Secret<String>>>,
    store: Box<dyn TokenStore>,
}

impl Session {
    /// Loads a previously persisted token, if any
    pub fn restore(store: Box<dyn TokenStore>) -> StorefrontResult<Self> {
        let token = store.load()?;
        logger::info!(authenticated = token.is_some(), "Session restored");
        Ok(Self {
            token: RwLock::new(token),
            store,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn token(&self) -> Option<Secret<String>> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The token, or [`StorefrontError::Unauthenticated`] pointing at the sign-in page
    pub fn require_token(&self) -> StorefrontResult<Secret<String>> {
        self.token().ok_or_else(|| {
            logger::info!("No session token; redirecting to sign in");
            error_stack::report!(StorefrontError::unauthenticated())
        })
    }

    /// Persists and starts using `token`
    pub fn set_token(&self, token: Secret<String>) -> StorefrontResult<()> {
        self.store.save(&token)?;
        let previous = self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(token);
        if let Some(mut previous) = previous {
            previous.zeroize();
        }
        Ok(())
    }

    pub fn logout(&self) -> StorefrontResult<()> {
        let previous = self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut previous) = previous {
            previous.zeroize();
        }
        self.store.clear()
    }

    /// `Authorization` header for the current token, masked in logs
    pub fn authorization_header(&self) -> Option<(String, Maskable<String>)> {
        self.token().map(|token| {
            (
                http::header::AUTHORIZATION.to_string(),
                format!("Bearer {}", token.expose()).into_masked(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn file_store_round_trip_and_logout() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("nested").join("session.json");

        let session = Session::restore(Box::new(FileTokenStore::new(&path))).unwrap();
        assert!(!session.is_authenticated());

        session
            .set_token(Secret::new("token-123".to_string()))
            .unwrap();
        assert!(path.exists());

        let restored = Session::restore(Box::new(FileTokenStore::new(&path))).unwrap();
        assert_eq!(restored.token().unwrap().peek(), "token-123");

        restored.logout().unwrap();
        assert!(!restored.is_authenticated());
        assert!(!path.exists());
        assert!(restored.require_token().is_err());
    }

    #[test]
    fn corrupt_session_file_means_signed_out() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("session.json");
        std::fs::write(&path, b"{not json").unwrap();

        let session = Session::restore(Box::new(FileTokenStore::new(&path))).unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn authorization_header_is_masked() {
        let session = Session::restore(Box::new(InMemoryTokenStore::with_token("abc.def"))).unwrap();
        let (name, value) = session.authorization_header().unwrap();

        assert_eq!(name, "authorization");
        assert_eq!(value.inner(), "Bearer abc.def");
        assert!(!format!("{value:?}").contains("abc.def"));
        assert!(!format!("{session:?}").contains("abc.def"));
    }

    #[test]
    fn require_token_redirects_to_signin() {
        let session = Session::restore(Box::new(InMemoryTokenStore::default())).unwrap();
        let error = session.require_token().unwrap_err();
        assert_eq!(
            error.current_context(),
            &StorefrontError::Unauthenticated {
                redirect_to: "/signin".to_string()
            }
        );
    }
}
