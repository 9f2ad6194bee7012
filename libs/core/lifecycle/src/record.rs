use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use uuid::Uuid;

/// Generate a fresh record id: 32 lowercase hex characters.
pub fn new_record_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Record status as stored in the `status` field.
///
/// Only `active` and `inactive` are ever written. Any other stored value is
/// kept verbatim and counts as live.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
    Other(String),
}

impl RecordStatus {
    pub const ACTIVE: &'static str = "active";
    pub const INACTIVE: &'static str = "inactive";

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => Self::ACTIVE,
            Self::Inactive => Self::INACTIVE,
            Self::Other(s) => s,
        }
    }

    /// A missing status is live, as is anything but `inactive`.
    pub fn is_live(status: Option<&RecordStatus>) -> bool {
        !matches!(status, Some(RecordStatus::Inactive))
    }
}

impl From<String> for RecordStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            Self::ACTIVE => Self::Active,
            Self::INACTIVE => Self::Inactive,
            _ => Self::Other(value),
        }
    }
}

impl From<RecordStatus> for String {
    fn from(value: RecordStatus) -> Self {
        match value {
            RecordStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which records an update or soft delete may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusGuard {
    /// Match on id alone
    Any,
    /// Match only when the record is not inactive
    LiveOnly,
}

/// A document stored in its own collection, keyed by a string `_id`.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    /// Human name used in log fields and messages
    const KIND: &'static str;
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    fn set_updated_on(&mut self, at: DateTime<Utc>);

    /// Resources without a status field are always live.
    fn status(&self) -> Option<&RecordStatus> {
        None
    }

    fn is_live(&self) -> bool {
        RecordStatus::is_live(self.status())
    }
}

/// A resource retired by marking it inactive rather than removing it.
pub trait SoftDeletable: Resource {
    fn set_status(&mut self, status: RecordStatus);
}
