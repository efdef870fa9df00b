use tracing::{info, warn};

use crate::models::account_action::AccountAction;

pub const AUDIT_TARGET: &str = "audit";

/// Structured audit trail for account state changes.
///
/// Events go to the `audit` tracing target so they can be routed separately
/// with `RUST_LOG=audit=info`.
#[derive(Clone, Debug, Default)]
pub struct AuditService;

impl AuditService {
    pub fn new() -> Self {
        Self
    }

    pub fn log(&self, actor: &str, action: AccountAction, sam_account_name: &str, success: bool) {
        if success {
            info!(
                target: AUDIT_TARGET,
                actor,
                action = action.as_str(),
                account = sam_account_name,
                success,
                "Account lockout state changed"
            );
        } else {
            warn!(
                target: AUDIT_TARGET,
                actor,
                action = action.as_str(),
                account = sam_account_name,
                success,
                "Account lockout change failed"
            );
        }
    }
}
