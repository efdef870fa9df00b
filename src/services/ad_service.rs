use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::directory::{filter, Directory, DirectorySession};
use crate::error::Result;
use crate::models::account_action::AccountAction;
use crate::models::ad_user::AdUser;

/// Queries and updates AD account lockout state.
///
/// Each call opens its own bound session and unbinds it before returning.
/// Unbind failures are ignored; the operation's own result wins.
#[derive(Clone)]
pub struct AdService {
    directory: Arc<dyn Directory>,
    base_dn: String,
}

impl AdService {
    pub fn new(directory: Arc<dyn Directory>, base_dn: impl Into<String>) -> Self {
        Self {
            directory,
            base_dn: base_dn.into(),
        }
    }

    pub fn base_dn(&self) -> &str {
        &self.base_dn
    }

    pub async fn get_locked_out_users(&self) -> Result<Vec<AdUser>> {
        self.search_users(&filter::locked_out_users()).await
    }

    pub async fn get_all_users(&self) -> Result<Vec<AdUser>> {
        self.search_users(&filter::all_users()).await
    }

    /// Clears `lockoutTime`. `Ok(false)` when the id is blank, the account
    /// does not exist, or the server refuses the modify.
    pub async fn unlock_user(&self, sam_account_name: &str) -> Result<bool> {
        self.set_lockout(sam_account_name, AccountAction::Unlock)
            .await
    }

    /// Stamps `lockoutTime` with the current time. Same failure rules as unlock.
    pub async fn lock_user(&self, sam_account_name: &str) -> Result<bool> {
        self.set_lockout(sam_account_name, AccountAction::Lock)
            .await
    }

    /// Binds once and unbinds.
    pub async fn check_connection(&self) -> Result<()> {
        let mut session = self.directory.connect().await?;
        let _ = session.unbind().await;
        Ok(())
    }

    async fn search_users(&self, search_filter: &str) -> Result<Vec<AdUser>> {
        let mut session = self.directory.connect().await?;
        let result = session
            .search(&self.base_dn, search_filter, filter::user_attributes())
            .await;
        let _ = session.unbind().await;

        let entries = result?;
        debug!(filter = search_filter, count = entries.len(), "User search complete");
        Ok(entries.iter().map(AdUser::from).collect())
    }

    async fn set_lockout(&self, sam_account_name: &str, action: AccountAction) -> Result<bool> {
        if sam_account_name.trim().is_empty() {
            debug!(%action, "Rejected blank account name");
            return Ok(false);
        }

        let mut session = self.directory.connect().await?;
        let result = self
            .apply_lockout(session.as_mut(), sam_account_name, action)
            .await;
        let _ = session.unbind().await;
        result
    }

    async fn apply_lockout(
        &self,
        session: &mut dyn DirectorySession,
        sam_account_name: &str,
        action: AccountAction,
    ) -> Result<bool> {
        let entries = session
            .search(
                &self.base_dn,
                &filter::user_by_sam_account_name(sam_account_name),
                vec![filter::ATTR_DISTINGUISHED_NAME.to_string()],
            )
            .await?;

        let Some(entry) = entries.first() else {
            warn!(account = sam_account_name, %action, "Account not found");
            return Ok(false);
        };

        let applied = session
            .modify_replace(&entry.dn, filter::ATTR_LOCKOUT_TIME, &action.lockout_value())
            .await?;

        if applied {
            info!(account = sam_account_name, dn = %entry.dn, %action, "Lockout state updated");
        } else {
            warn!(account = sam_account_name, dn = %entry.dn, %action, "Lockout update rejected");
        }
        Ok(applied)
    }
}
