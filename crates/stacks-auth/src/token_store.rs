use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "stacks-client";
const KEYRING_USER: &str = "api-token";
const CREDENTIALS_FILE_NAME: &str = "credentials";
const TOKEN_ENV_VAR: &str = "STACKS_AUTH__TOKEN";

/// Read/write access to the single persisted bearer token.
///
/// Injected into `ApiClient` and [`crate::Session`] rather than reached for as
/// ambient global state, so tests can substitute a [`MemoryStore`]. Absence of
/// a token means "signed out"; at most one token is current per store, last
/// write wins.
pub trait TokenStore: Send + Sync {
    /// Current token, or `None` when signed out or when no storage is
    /// available at all.
    fn get(&self) -> Option<String>;

    /// `Some` overwrites the stored token; `None` removes it. No validation
    /// of the token structure is performed here.
    fn set(&self, token: Option<&str>) -> Result<(), AuthError>;
}

/// Returns the keyring service name.
///
/// Defaults to `"stacks-client"`. Override via `STACKS_KEYRING_SERVICE` env
/// var for testing (e.g., `"stacks-client-test"`) to avoid touching real
/// credentials.
fn keyring_service() -> String {
    std::env::var("STACKS_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Persistent token store backed by the OS keychain with env and file tiers.
///
/// Reads resolve keyring → `STACKS_AUTH__TOKEN` env → `~/.stacks/credentials`.
/// Writes go to the keyring, falling back to the file when the keyring is
/// unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialsStore;

impl CredentialsStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TokenStore for CredentialsStore {
    fn get(&self) -> Option<String> {
        // 1. Keyring
        if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
            && let Ok(token) = entry.get_password()
            && !token.is_empty()
        {
            return Some(token);
        }

        // 2. Environment variable
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.is_empty() {
                return Some(token);
            }
        }

        // 3. File fallback
        load_file()
    }

    fn set(&self, token: Option<&str>) -> Result<(), AuthError> {
        match token {
            Some(token) => store(token),
            None => delete(),
        }
    }
}

/// Store a token in the OS keychain. Falls back to file if keyring unavailable.
fn store(token: &str) -> Result<(), AuthError> {
    match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        Ok(entry) => match entry.set_password(token) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                store_file(token)
            }
        },
        Err(error) => {
            tracing::warn!(%error, "keyring unavailable; falling back to file");
            store_file(token)
        }
    }
}

/// Delete stored credentials from keyring and file.
fn delete() -> Result<(), AuthError> {
    // Delete from keyring (ignore errors — may not exist)
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        let _ = entry.delete_credential();
    }

    // Delete credentials file. A missing home directory means there is
    // nothing persisted to remove.
    let Ok(path) = credentials_path() else {
        return Ok(());
    };
    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            AuthError::TokenStore(format!("failed to delete {}: {e}", path.display()))
        })?;
    }

    Ok(())
}

// --- Private file helpers ---

fn credentials_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".stacks").join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            AuthError::TokenStore("home directory not found — cannot store credentials".into())
        })
}

fn store_file(token: &str) -> Result<(), AuthError> {
    let path = credentials_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::TokenStore(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(&path, token)
        .map_err(|e| AuthError::TokenStore(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::TokenStore(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_file() -> Option<String> {
    let path = credentials_path().ok()?;
    fs::read_to_string(&path)
        .ok()
        .filter(|s| !s.trim().is_empty())
}

/// In-memory token store for tests and embedded use. Nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    token: RwLock<Option<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for a store that starts signed in.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryStore {
    fn get(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn set(&self, token: Option<&str>) -> Result<(), AuthError> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| AuthError::TokenStore("memory store lock poisoned".into()))?;
        *guard = token.map(str::to_owned);
        Ok(())
    }
}
