//! # Live integration tests for stacks-client
//!
//! These tests require a running backend and test credentials. They are
//! skipped (not failed) when credentials are missing.
//!
//! ## Required environment variables
//!
//! ```bash
//! STACKS_API__BASE_URL=http://localhost:8000/api/v1
//! STACKS_TEST__EMAIL=test@example.com
//! STACKS_TEST__PASSWORD=...
//! ```
//!
//! ## Run
//!
//! ```bash
//! cargo test -p stacks-client --test live_api -- --nocapture
//! ```

use std::sync::Arc;

use stacks_auth::{MemoryStore, TokenStore};
use stacks_client::ApiClient;
use stacks_config::StacksConfig;

fn load_env() {
    let workspace_env = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.join(".env"));

    if let Some(env_path) = workspace_env {
        let _ = dotenvy::from_path(&env_path);
    }
}

fn test_credentials() -> Option<(String, String)> {
    load_env();
    let email = std::env::var("STACKS_TEST__EMAIL").ok()?;
    let password = std::env::var("STACKS_TEST__PASSWORD").ok()?;
    if email.is_empty() || password.is_empty() {
        return None;
    }
    Some((email, password))
}

#[tokio::test]
async fn login_profile_logout_roundtrip() {
    let Some((email, password)) = test_credentials() else {
        eprintln!("skipping: STACKS_TEST__EMAIL / STACKS_TEST__PASSWORD not set");
        return;
    };

    let config = StacksConfig::load().expect("config");
    let store = Arc::new(MemoryStore::new());
    let client = ApiClient::from_config(&config, Arc::clone(&store) as Arc<dyn TokenStore>);

    let token = client.login(&email, &password).await.expect("login");
    assert!(!token.access_token.is_empty());
    store.set(Some(&token.access_token)).expect("store token");

    let user = client.profile().await.expect("profile");
    assert_eq!(user.email, email);

    let page = client.list_books(1, 5).await.expect("list books");
    assert!(page.size >= 1);

    client.logout().await.expect("logout");
}
