use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token store error: {0}")]
    TokenStore(String),

    #[error("session not installed — call session::install before session::current")]
    SessionNotInstalled,

    #[error("session already installed")]
    SessionAlreadyInstalled,

    #[error("invalid token: {0}")]
    InvalidToken(String),
}
