//! Search filters for AD user objects.

use ldap3::ldap_escape;

pub const ATTR_NAME: &str = "name";
pub const ATTR_SAM_ACCOUNT_NAME: &str = "sAMAccountName";
pub const ATTR_LOCKOUT_TIME: &str = "lockoutTime";
pub const ATTR_DISTINGUISHED_NAME: &str = "distinguishedName";

const USER_CLAUSES: &str = "(objectCategory=person)(objectClass=user)";

pub fn all_users() -> String {
    format!("(&{})", USER_CLAUSES)
}

pub fn locked_out_users() -> String {
    format!("(&{}({}>=1))", USER_CLAUSES, ATTR_LOCKOUT_TIME)
}

/// Exact match on the account name. The value is escaped per RFC 4515.
pub fn user_by_sam_account_name(sam_account_name: &str) -> String {
    format!(
        "(&{}({}={}))",
        USER_CLAUSES,
        ATTR_SAM_ACCOUNT_NAME,
        ldap_escape(sam_account_name)
    )
}

pub fn user_attributes() -> Vec<String> {
    vec![
        ATTR_NAME.to_string(),
        ATTR_SAM_ACCOUNT_NAME.to_string(),
        ATTR_LOCKOUT_TIME.to_string(),
    ]
}
