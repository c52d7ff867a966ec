use super::audience::resolve_audience;
use super::lookup::{materialize, resolve_user};
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::Arc;

pub struct RealNotificationService {
    user_repo: Arc<dyn UserRepo>,
    friendship_repo: Arc<dyn FriendshipRepo>,
    subscription_repo: Arc<dyn SubscriptionRepo>,
    block_repo: Arc<dyn BlockRepo>,
}

impl RealNotificationService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        friendship_repo: Arc<dyn FriendshipRepo>,
        subscription_repo: Arc<dyn SubscriptionRepo>,
        block_repo: Arc<dyn BlockRepo>,
    ) -> Self {
        Self {
            user_repo,
            friendship_repo,
            subscription_repo,
            block_repo,
        }
    }

    async fn mentioned_ids(&self, text: &str) -> Result<Vec<UserId>, RelationError> {
        let emails = extract_emails(text);
        if emails.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .user_repo
            .get_by_emails(&emails)
            .await?
            .into_iter()
            .map(|u| u.user_id)
            .collect())
    }
}

#[async_trait::async_trait]
impl NotificationService for RealNotificationService {
    async fn get_update_recipients(
        &self,
        caller: Caller,
        sender_email: &str,
        text: &str,
    ) -> Result<Vec<UserRecord>, RelationError> {
        let sender = resolve_user(&*self.user_repo, sender_email).await?;
        if !caller.role.is_privileged() && caller.user_id != sender.user_id {
            return Err(RelationError::NotPermitted);
        }

        let blocked_by = self.block_repo.list_requestor_ids(sender.user_id).await?;
        let friend_ids = self.friendship_repo.list_friend_ids(sender.user_id).await?;
        let subscriber_ids = self
            .subscription_repo
            .list_subscriber_ids(sender.user_id)
            .await?;
        let mentioned_ids = self.mentioned_ids(text).await?;

        let audience = resolve_audience(
            [
                friend_ids.as_slice(),
                subscriber_ids.as_slice(),
                mentioned_ids.as_slice(),
            ],
            &blocked_by,
        );
        let recipient_ids: Vec<UserId> = audience.into_iter().collect();
        trace!(
            sender = %sender.user_id,
            friends = friend_ids.len(),
            subscribers = subscriber_ids.len(),
            mentioned = mentioned_ids.len(),
            blocked_by = blocked_by.len(),
            recipients = recipient_ids.len(),
            "resolved broadcast audience"
        );

        materialize(&*self.user_repo, &recipient_ids).await
    }
}
