use super::memory_store::{MemoryStore, Write, downcast};
use crate::domain_model::*;
use crate::domain_port::*;

pub struct MemorySubscriptionRepo {
    store: MemoryStore,
}

impl MemorySubscriptionRepo {
    pub fn new(store: MemoryStore) -> Self {
        MemorySubscriptionRepo { store }
    }
}

#[async_trait::async_trait]
impl SubscriptionRepo for MemorySubscriptionRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), RepoError> {
        downcast(tx)
            .stage(Write::InsertSubscription(requestor, target))
            .await
    }

    async fn get(
        &self,
        requestor: UserId,
        target: UserId,
    ) -> Result<Option<Subscription>, RepoError> {
        Ok(self
            .store
            .read(|t| {
                t.subscriptions
                    .iter()
                    .find(|s| s.requestor == requestor && s.target == target)
                    .cloned()
            })
            .await)
    }

    async fn delete_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), RepoError> {
        downcast(tx)
            .stage(Write::DeleteSubscription(requestor, target))
            .await
    }

    async fn list_subscriber_ids(&self, target: UserId) -> Result<Vec<UserId>, RepoError> {
        Ok(self
            .store
            .read(|t| {
                t.subscriptions
                    .iter()
                    .filter(|s| s.target == target)
                    .map(|s| s.requestor)
                    .collect::<Vec<_>>()
            })
            .await)
    }
}
