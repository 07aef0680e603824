//! Domain rules for the Scribe article service.
//!
//! Everything in this crate is free of database and HTTP concerns so it can be
//! shared by the repository layer, the API server, and tests.

pub mod article;
pub mod attachment;
pub mod blob;
pub mod comment;
pub mod error;
pub mod export;
pub mod roles;
pub mod types;
pub mod workspace;
