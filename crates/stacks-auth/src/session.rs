use std::sync::{Arc, OnceLock};

use tokio::sync::watch;

use crate::claims;
use crate::error::AuthError;
use crate::token_store::TokenStore;

/// Point-in-time view of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
    /// Subject decoded from `token`. Always derived, never stored.
    pub identity: Option<String>,
}

/// Reactive session state backed by a [`TokenStore`].
///
/// All mutation goes through [`Session::set_token`], which writes to the
/// store before publishing the new value, so no observer ever sees a reactive
/// value that persisted storage does not already reflect. The identity is
/// recomputed from the token on every read and cannot diverge from it.
pub struct Session {
    store: Arc<dyn TokenStore>,
    state: watch::Sender<Option<String>>,
}

impl Session {
    /// Create a session seeded from whatever the store currently holds.
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(store.get());
        Self { store, state }
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.borrow().clone()
    }

    /// Subject decoded from the current token.
    #[must_use]
    pub fn identity(&self) -> Option<String> {
        self.token().as_deref().and_then(claims::decode_subject)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        let token = self.token();
        let identity = token.as_deref().and_then(claims::decode_subject);
        SessionState { token, identity }
    }

    /// Store the token, then publish the change. Write-through ordering: if
    /// the store write fails, the reactive value is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStore` if the underlying store write fails.
    pub fn set_token(&self, token: Option<&str>) -> Result<(), AuthError> {
        self.store.set(token)?;
        self.state.send_replace(token.map(str::to_owned));
        Ok(())
    }

    /// Sign out: remove the stored token and publish the absence.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStore` if the stored token cannot be removed.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.set_token(None)
    }

    /// Re-read the store into the reactive value.
    ///
    /// A 401 response clears the store as a side effect of response
    /// normalization but does not reach into any `Session`; callers resync
    /// with this after an authentication failure surfaces.
    pub fn refresh(&self) {
        self.state.send_replace(self.store.get());
    }

    /// Watch for token changes. Receivers see the value current at
    /// subscription time and every subsequent [`Session::set_token`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.state.subscribe()
    }
}

static GLOBAL: OnceLock<Arc<Session>> = OnceLock::new();

/// Install the process-wide session handle. Once-only.
///
/// # Errors
///
/// Returns `AuthError::SessionAlreadyInstalled` on a second call.
pub fn install(session: Arc<Session>) -> Result<(), AuthError> {
    GLOBAL
        .set(session)
        .map_err(|_| AuthError::SessionAlreadyInstalled)
}

/// The process-wide session.
///
/// Accessing the session before [`install`] is a programming error and is
/// signaled immediately as `AuthError::SessionNotInstalled` rather than
/// yielding some default.
pub fn current() -> Result<Arc<Session>, AuthError> {
    GLOBAL.get().cloned().ok_or(AuthError::SessionNotInstalled)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::token_store::MemoryStore;

    use base64::Engine as _;

    fn make_token(sub: &str) -> String {
        let encode = |s: &str| base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(s);
        format!(
            "{}.{}.{}",
            encode(r#"{"alg":"HS256"}"#),
            encode(&format!(r#"{{"sub":"{sub}"}}"#)),
            encode("sig")
        )
    }

    #[test]
    fn new_seeds_token_from_store() {
        let store = Arc::new(MemoryStore::with_token("seed"));
        let session = Session::new(store);
        assert_eq!(session.token(), Some("seed".to_string()));
    }

    #[test]
    fn set_token_writes_through_to_store() {
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(Arc::clone(&store) as Arc<dyn TokenStore>);

        session.set_token(Some("tok")).expect("set");
        assert_eq!(store.get(), Some("tok".to_string()));
        assert_eq!(session.token(), Some("tok".to_string()));

        session.logout().expect("logout");
        assert_eq!(store.get(), None);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn identity_is_recomputed_from_token() {
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store);
        assert_eq!(session.identity(), None);

        let token = make_token("casey@example.com");
        session.set_token(Some(&token)).expect("set");
        assert_eq!(session.identity(), Some("casey@example.com".to_string()));

        session.set_token(Some("malformed")).expect("set");
        assert_eq!(session.identity(), None, "malformed token has no identity");
    }

    #[test]
    fn snapshot_pairs_token_with_derived_identity() {
        let token = make_token("sam@example.com");
        let store = Arc::new(MemoryStore::with_token(&token));
        let session = Session::new(store);

        let state = session.snapshot();
        assert_eq!(state.token, Some(token));
        assert_eq!(state.identity, Some("sam@example.com".to_string()));
    }

    #[test]
    fn refresh_resyncs_after_external_store_clear() {
        let store = Arc::new(MemoryStore::with_token("tok"));
        let session = Session::new(Arc::clone(&store) as Arc<dyn TokenStore>);
        assert_eq!(session.token(), Some("tok".to_string()));

        // Simulate the normalizer clearing the store on a 401: the session
        // still holds the stale value until the caller refreshes.
        store.set(None).expect("clear");
        assert_eq!(session.token(), Some("tok".to_string()));

        session.refresh();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn subscribers_observe_token_changes() {
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store);
        let mut rx = session.subscribe();
        assert_eq!(*rx.borrow(), None);

        session.set_token(Some("tok")).expect("set");
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(*rx.borrow_and_update(), Some("tok".to_string()));
    }

    // OnceLock state is per-process; the whole install/current lifecycle
    // lives in a single test so ordering is deterministic.
    #[test]
    fn global_install_lifecycle() {
        assert!(matches!(
            current(),
            Err(AuthError::SessionNotInstalled)
        ));

        let session = Arc::new(Session::new(Arc::new(MemoryStore::new())));
        install(session).expect("first install succeeds");
        assert!(current().is_ok());

        let second = Arc::new(Session::new(Arc::new(MemoryStore::new())));
        assert!(matches!(
            install(second),
            Err(AuthError::SessionAlreadyInstalled)
        ));
    }
}
