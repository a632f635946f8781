//! Credential and session-token primitives shared by the account backend.
//!
//! - `hash`: password digests used for storage and comparison
//! - `jwt`: HS256 session token issuance and verification

pub mod hash;
pub mod jwt;

pub use hash::{digest_password, verify_password};
pub use jwt::{Claims, IssuedToken, SessionTokens, TokenError};
