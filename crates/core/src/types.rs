/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Users live in the external auth service and are identified by UUID.
pub type UserId = uuid::Uuid;

/// Article version numbers start at 1 and are contiguous per article.
pub type VersionNumber = i32;
