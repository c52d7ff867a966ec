use crate::domain_model::*;
use crate::domain_port::{RepoError, StorageTx};

#[async_trait::async_trait]
pub trait BlockRepo: Send + Sync {
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
    ) -> Result<Option<BlockRelationship>, RepoError>;

    /// Deleting a missing row is not an error.
    async fn delete_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), RepoError>;

    /// Users who have blocked `target`.
    async fn list_requestor_ids(&self, target: UserId) -> Result<Vec<UserId>, RepoError>;
}
