/// All surrogate primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (week starts, billing periods) carry no time zone.
pub type Date = chrono::NaiveDate;
