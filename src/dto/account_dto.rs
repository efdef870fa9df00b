use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::account_action::AccountAction;
use crate::models::ad_user::AdUser;
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AccountPath {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 256, message = "account name is too long")
    )]
    pub sam_account_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<AdUser>,
    pub count: usize,
}

impl From<Vec<AdUser>> for UserListResponse {
    fn from(users: Vec<AdUser>) -> Self {
        Self {
            count: users.len(),
            users,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountActionResponse {
    pub sam_account_name: String,
    pub action: AccountAction,
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_account_path_fails_validation() {
        let path = AccountPath {
            sam_account_name: "   ".to_string(),
        };
        assert!(path.validate().is_err());

        let path = AccountPath {
            sam_account_name: "jdoe".to_string(),
        };
        assert!(path.validate().is_ok());
    }
}
