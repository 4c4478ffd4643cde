/// Annotation primary keys are PostgreSQL BIGSERIAL; the sequential order
/// doubles as the "first/next unlabeled" ordering key.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
