use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::directory::{filter, DirectoryEntry};
use crate::utils::time::parse_filetime;

/// An Active Directory user as returned by a lockout query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdUser {
    pub name: String,
    pub sam_account_name: String,
    /// Set only while the account is locked.
    pub lockout_time: Option<DateTime<Utc>>,
}

impl AdUser {
    pub fn is_locked(&self) -> bool {
        self.lockout_time.is_some()
    }
}

impl From<&DirectoryEntry> for AdUser {
    fn from(entry: &DirectoryEntry) -> Self {
        Self {
            name: entry.first(filter::ATTR_NAME).unwrap_or_default().to_string(),
            sam_account_name: entry
                .first(filter::ATTR_SAM_ACCOUNT_NAME)
                .unwrap_or_default()
                .to_string(),
            lockout_time: entry
                .first(filter::ATTR_LOCKOUT_TIME)
                .and_then(parse_filetime),
        }
    }
}
