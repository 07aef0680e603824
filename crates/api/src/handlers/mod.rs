pub mod articles;
pub mod attachments;
pub mod comments;
pub mod workspaces;
