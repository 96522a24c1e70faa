//! # stacks-auth
//!
//! Bearer-token lifecycle for Stacks API clients.
//!
//! Provides tiered token persistence (`keyring` with env and file fallback),
//! unverified claims decoding for display identity, and a reactive [`Session`]
//! holder that writes through to its [`TokenStore`].
//!
//! The token itself is opaque to this crate: it is stored and attached to
//! requests as-is, and only its payload segment is decoded (best-effort,
//! unverified) to derive the signed-in identity.

pub mod claims;
pub mod error;
pub mod session;
pub mod token_store;

pub use error::AuthError;
pub use session::{Session, SessionState};
pub use token_store::{CredentialsStore, MemoryStore, TokenStore};
