use crate::domain_model::*;
use crate::domain_port::{RepoError, StorageTx};

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Seeds a user row. Account management itself lives outside this crate.
    async fn create_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        email: &str,
        role: Role,
    ) -> Result<UserId, RepoError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepoError>;

    async fn get_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>, RepoError>;

    /// Users for `ids` in the same order; ids without a row are skipped.
    async fn get_by_ids(&self, ids: &[UserId]) -> Result<Vec<UserRecord>, RepoError>;

    /// Users whose email is in `emails`; unknown emails are skipped.
    async fn get_by_emails(&self, emails: &[String]) -> Result<Vec<UserRecord>, RepoError>;
}
