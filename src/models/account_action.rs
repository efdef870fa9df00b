use serde::{Deserialize, Serialize};

use crate::utils::time::{now, to_filetime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountAction {
    Lock,
    Unlock,
}

impl AccountAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountAction::Lock => "lock",
            AccountAction::Unlock => "unlock",
        }
    }

    /// Value written to `lockoutTime`: the current FILETIME for a lock, `0` to clear it.
    pub fn lockout_value(&self) -> String {
        match self {
            AccountAction::Lock => to_filetime(now()).to_string(),
            AccountAction::Unlock => "0".to_string(),
        }
    }
}

impl std::fmt::Display for AccountAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
