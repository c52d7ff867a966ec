use crate::domain_model::*;
use crate::domain_port::{RepoError, StorageTx};

#[async_trait::async_trait]
pub trait FriendshipRepo: Send + Sync {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        pair: UserPair,
    ) -> Result<(), RepoError>;

    async fn get(&self, pair: UserPair) -> Result<Option<Friendship>, RepoError>;

    /// Ids on the other side of every friendship touching `user_id`, in storage order.
    async fn list_friend_ids(&self, user_id: UserId) -> Result<Vec<UserId>, RepoError>;
}
