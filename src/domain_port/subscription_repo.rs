use crate::domain_model::*;
use crate::domain_port::{RepoError, StorageTx};

#[async_trait::async_trait]
pub trait SubscriptionRepo: Send + Sync {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), RepoError>;

    async fn get(
        &self,
        requestor: UserId,
        target: UserId,
    ) -> Result<Option<Subscription>, RepoError>;

    /// Deleting a missing row is not an error.
    async fn delete_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), RepoError>;

    /// Requestors of every subscription whose target is `target`.
    async fn list_subscriber_ids(&self, target: UserId) -> Result<Vec<UserId>, RepoError>;
}
