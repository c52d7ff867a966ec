use super::lookup::{ensure_distinct, finish_tx, materialize, resolve_user};
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::collections::HashSet;
use std::sync::Arc;

pub struct RealFriendshipService {
    user_repo: Arc<dyn UserRepo>,
    friendship_repo: Arc<dyn FriendshipRepo>,
    block_repo: Arc<dyn BlockRepo>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealFriendshipService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        friendship_repo: Arc<dyn FriendshipRepo>,
        block_repo: Arc<dyn BlockRepo>,
        tx_manager: Arc<dyn TxManager>,
    ) -> Self {
        Self {
            user_repo,
            friendship_repo,
            block_repo,
            tx_manager,
        }
    }

    async fn is_blocked_either_way(&self, a: UserId, b: UserId) -> Result<bool, RelationError> {
        if self.block_repo.get(a, b).await?.is_some() {
            return Ok(true);
        }
        Ok(self.block_repo.get(b, a).await?.is_some())
    }
}

#[async_trait::async_trait]
impl FriendshipService for RealFriendshipService {
    async fn create_friendship(
        &self,
        caller: Caller,
        email_a: &str,
        email_b: &str,
    ) -> Result<(), RelationError> {
        let user_a = resolve_user(&*self.user_repo, email_a).await?;
        let user_b = resolve_user(&*self.user_repo, email_b).await?;
        if caller.user_id != user_a.user_id && caller.user_id != user_b.user_id {
            return Err(RelationError::NotPermitted);
        }
        ensure_distinct(&user_a, &user_b)?;

        if self
            .is_blocked_either_way(user_a.user_id, user_b.user_id)
            .await?
        {
            return Err(RelationError::IsBlocked("one user has blocked the other"));
        }

        let pair = UserPair::new(user_a.user_id, user_b.user_id);
        let mut tx = self.tx_manager.begin().await?;
        let result = match self.friendship_repo.insert_in_tx(&mut *tx, pair).await {
            Ok(()) => Ok(()),
            Err(RepoError::AlreadyExists) => Err(RelationError::AlreadyFriends),
            Err(e) => Err(e.into()),
        };
        finish_tx(tx, result, || RelationError::AlreadyFriends).await?;

        debug!(low = %pair.min(), high = %pair.max(), "friendship created");
        Ok(())
    }

    async fn retrieve_friends_list(
        &self,
        caller: Caller,
        email: &str,
    ) -> Result<Vec<UserRecord>, RelationError> {
        let user = resolve_user(&*self.user_repo, email).await?;
        // ownership only; the admin role does not widen this
        if caller.user_id != user.user_id {
            return Err(RelationError::NotPermitted);
        }

        let friend_ids = self.friendship_repo.list_friend_ids(user.user_id).await?;
        materialize(&*self.user_repo, &friend_ids).await
    }

    async fn retrieve_common_friends(
        &self,
        caller: Caller,
        email_a: &str,
        email_b: &str,
    ) -> Result<Vec<UserRecord>, RelationError> {
        let user_a = resolve_user(&*self.user_repo, email_a).await?;
        let user_b = resolve_user(&*self.user_repo, email_b).await?;
        if caller.user_id != user_a.user_id && caller.user_id != user_b.user_id {
            return Err(RelationError::NotPermitted);
        }
        ensure_distinct(&user_a, &user_b)?;

        let friends_of_a: HashSet<UserId> = self
            .friendship_repo
            .list_friend_ids(user_a.user_id)
            .await?
            .into_iter()
            .collect();
        let common: Vec<UserId> = self
            .friendship_repo
            .list_friend_ids(user_b.user_id)
            .await?
            .into_iter()
            .filter(|id| friends_of_a.contains(id))
            .collect();

        materialize(&*self.user_repo, &common).await
    }
}
