//! Account endpoints: signup, login, profile, logout.
//!
//! Login is the bearer-token JSON exchange: credentials go in the body, the
//! token comes back in the payload. Storing it (and publishing it to a
//! `Session`) is the caller's decision — these methods never touch the store.

use serde_json::json;

use crate::error::ApiError;
use crate::models::{TokenResponse, User};
use crate::ApiClient;

impl ApiClient {
    /// Register a new account with the default `user` role.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the email is taken.
    pub async fn signup(&self, email: &str, password: &str) -> Result<User, ApiError> {
        self.execute(
            self.post("/auth/signup")
                .json(&json!({ "email": email, "password": password, "role": "user" })),
        )
        .await
    }

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on invalid credentials or transport failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        self.execute(
            self.post("/auth/login")
                .json(&json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Fetch the signed-in account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the session is invalid.
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.execute(self.get("/auth/profile")).await
    }

    /// Update email and/or password. Absent fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn update_profile(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, ApiError> {
        let mut body = serde_json::Map::new();
        if let Some(email) = email {
            body.insert("email".into(), json!(email));
        }
        if let Some(password) = password {
            body.insert("password".into(), json!(password));
        }
        self.execute(self.put("/auth/profile").json(&body)).await
    }

    /// Invalidate the session server-side. The locally stored token is not
    /// touched here; pair with `Session::logout`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.execute_unit(self.post("/auth/logout")).await
    }
}
