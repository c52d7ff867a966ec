use super::memory_store::{MemoryStore, Write, downcast};
use crate::domain_model::*;
use crate::domain_port::*;

pub struct MemoryFriendshipRepo {
    store: MemoryStore,
}

impl MemoryFriendshipRepo {
    pub fn new(store: MemoryStore) -> Self {
        MemoryFriendshipRepo { store }
    }
}

#[async_trait::async_trait]
impl FriendshipRepo for MemoryFriendshipRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        pair: UserPair,
    ) -> Result<(), RepoError> {
        downcast(tx).stage(Write::InsertFriendship(pair)).await
    }

    async fn get(&self, pair: UserPair) -> Result<Option<Friendship>, RepoError> {
        Ok(self
            .store
            .read(|t| t.friendships.iter().find(|f| f.pair == pair).cloned())
            .await)
    }

    async fn list_friend_ids(&self, user_id: UserId) -> Result<Vec<UserId>, RepoError> {
        Ok(self
            .store
            .read(|t| {
                t.friendships
                    .iter()
                    .filter_map(|f| f.pair.other(user_id))
                    .collect::<Vec<_>>()
            })
            .await)
    }
}
