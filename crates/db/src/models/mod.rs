//! Row and DTO types for every table.

pub mod article;
pub mod article_version;
pub mod attachment;
pub mod comment;
pub mod workspace;
