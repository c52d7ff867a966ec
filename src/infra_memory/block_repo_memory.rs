use super::memory_store::{MemoryStore, Write, downcast};
use crate::domain_model::*;
use crate::domain_port::*;

pub struct MemoryBlockRepo {
    store: MemoryStore,
}

impl MemoryBlockRepo {
    pub fn new(store: MemoryStore) -> Self {
        MemoryBlockRepo { store }
    }
}

#[async_trait::async_trait]
impl BlockRepo for MemoryBlockRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), RepoError> {
        downcast(tx)
            .stage(Write::InsertBlock(requestor, target))
            .await
    }

    async fn get(
        &self,
        requestor: UserId,
        target: UserId,
    ) -> Result<Option<BlockRelationship>, RepoError> {
        Ok(self
            .store
            .read(|t| {
                t.blocks
                    .iter()
                    .find(|b| b.requestor == requestor && b.target == target)
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
        downcast(tx).stage(Write::DeleteBlock(requestor, target)).await
    }

    async fn list_requestor_ids(&self, target: UserId) -> Result<Vec<UserId>, RepoError> {
        Ok(self
            .store
            .read(|t| {
                t.blocks
                    .iter()
                    .filter(|b| b.target == target)
                    .map(|b| b.requestor)
                    .collect::<Vec<_>>()
            })
            .await)
    }
}
