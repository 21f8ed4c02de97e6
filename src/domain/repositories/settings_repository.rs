//! Repository trait for account settings.

use crate::domain::entities::GlobalSettings;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to per-account [`GlobalSettings`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Loads the settings of an account.
    ///
    /// Returns `Ok(None)` when the account never saved settings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_owner(&self, owner_id: &str) -> Result<Option<GlobalSettings>, AppError>;
}
