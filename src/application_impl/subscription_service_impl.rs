use super::lookup::{ensure_distinct, finish_tx, resolve_user};
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::Arc;

pub struct RealSubscriptionService {
    user_repo: Arc<dyn UserRepo>,
    subscription_repo: Arc<dyn SubscriptionRepo>,
    friendship_repo: Arc<dyn FriendshipRepo>,
    block_repo: Arc<dyn BlockRepo>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealSubscriptionService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        subscription_repo: Arc<dyn SubscriptionRepo>,
        friendship_repo: Arc<dyn FriendshipRepo>,
        block_repo: Arc<dyn BlockRepo>,
        tx_manager: Arc<dyn TxManager>,
    ) -> Self {
        Self {
            user_repo,
            subscription_repo,
            friendship_repo,
            block_repo,
            tx_manager,
        }
    }

    async fn subscribe_in_tx(
        &self,
        tx: &mut dyn StorageTx<'_>,
        requestor: UserId,
        target: UserId,
        lift_block: bool,
    ) -> Result<(), RelationError> {
        if lift_block {
            self.block_repo.delete_in_tx(tx, requestor, target).await?;
        }
        match self
            .subscription_repo
            .insert_in_tx(tx, requestor, target)
            .await
        {
            Ok(()) => Ok(()),
            Err(RepoError::AlreadyExists) => Err(RelationError::AlreadySubscribed),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait::async_trait]
impl SubscriptionService for RealSubscriptionService {
    async fn create_subscription(
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

        // A requestor blocking the target may only subscribe through the
        // block when the two are friends; doing so lifts the block.
        let lift_block = match self
            .block_repo
            .get(requestor.user_id, target.user_id)
            .await?
        {
            None => false,
            Some(_) => {
                let pair = UserPair::new(requestor.user_id, target.user_id);
                if self.friendship_repo.get(pair).await?.is_none() {
                    return Err(RelationError::IsBlocked(
                        "requestor has blocked the target",
                    ));
                }
                true
            }
        };

        let mut tx = self.tx_manager.begin().await?;
        let result = self
            .subscribe_in_tx(&mut *tx, requestor.user_id, target.user_id, lift_block)
            .await;
        finish_tx(tx, result, || RelationError::AlreadySubscribed).await?;

        debug!(
            requestor = %requestor.user_id,
            target = %target.user_id,
            lifted_block = lift_block,
            "subscription created"
        );
        Ok(())
    }
}
