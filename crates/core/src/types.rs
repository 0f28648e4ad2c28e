/// All catalog primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Users are identified by the hosted identity service's UUID.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amounts are integer cents.
pub type Cents = i64;
