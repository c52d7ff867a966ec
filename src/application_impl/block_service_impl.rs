use super::lookup::{ensure_distinct, finish_tx, resolve_user};
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::Arc;

pub struct RealBlockService {
    user_repo: Arc<dyn UserRepo>,
    block_repo: Arc<dyn BlockRepo>,
    friendship_repo: Arc<dyn FriendshipRepo>,
    subscription_repo: Arc<dyn SubscriptionRepo>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealBlockService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        block_repo: Arc<dyn BlockRepo>,
        friendship_repo: Arc<dyn FriendshipRepo>,
        subscription_repo: Arc<dyn SubscriptionRepo>,
        tx_manager: Arc<dyn TxManager>,
    ) -> Self {
        Self {
            user_repo,
            block_repo,
            friendship_repo,
            subscription_repo,
            tx_manager,
        }
    }

    /// | friends | subscribed | outcome                   |
    /// |---------|------------|---------------------------|
    /// | no      | no         | block                     |
    /// | no      | yes        | unsubscribe, then block   |
    /// | yes     | yes        | unsubscribe, then block   |
    /// | yes     | no         | `NotSubscribed`           |
    async fn block_in_tx(
        &self,
        tx: &mut dyn StorageTx<'_>,
        requestor: UserId,
        target: UserId,
        friends: bool,
        subscribed: bool,
    ) -> Result<(), RelationError> {
        if friends && !subscribed {
            return Err(RelationError::NotSubscribed);
        }
        if subscribed {
            self.subscription_repo
                .delete_in_tx(tx, requestor, target)
                .await?;
        }
        match self.block_repo.insert_in_tx(tx, requestor, target).await {
            Ok(()) => Ok(()),
            Err(RepoError::AlreadyExists) => Err(RelationError::AlreadyBlocked),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait::async_trait]
impl BlockService for RealBlockService {
    async fn create_block_relationship(
        &self,
        caller: Caller,
        requestor_email: &str,
        target_email: &str,
    ) -> Result<(), RelationError> {
        let requestor = resolve_user(&*self.user_repo, requestor_email).await?;
        let target = resolve_user(&*self.user_repo, target_email).await?;
        if caller.user_id != requestor.user_id {
            return Err(RelationError::NotPermitted);
        }
        ensure_distinct(&requestor, &target)?;

        // Read outside the transaction; a concurrent write between these
        // reads and the commit can change which branch applies.
        let pair = UserPair::new(requestor.user_id, target.user_id);
        let friends = self.friendship_repo.get(pair).await?.is_some();
        let subscribed = self
            .subscription_repo
            .get(requestor.user_id, target.user_id)
            .await?
            .is_some();

        let mut tx = self.tx_manager.begin().await?;
        let result = self
            .block_in_tx(
                &mut *tx,
                requestor.user_id,
                target.user_id,
                friends,
                subscribed,
            )
            .await;
        finish_tx(tx, result, || RelationError::AlreadyBlocked).await?;

        debug!(
            requestor = %requestor.user_id,
            target = %target.user_id,
            dropped_subscription = subscribed,
            "block created"
        );
        Ok(())
    }
}
