//! Access-token handling.
//!
//! Tokens are minted by the external identity service; this server only
//! validates them. [`jwt::generate_access_token`] exists for tooling and tests.

pub mod jwt;
