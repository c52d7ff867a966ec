use crate::application_port::RelationError;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait FriendshipService: Send + Sync {
    /// `caller` must be one of the two users.
    async fn create_friendship(
        &self,
        caller: Caller,
        email_a: &str,
        email_b: &str,
    ) -> Result<(), RelationError>;

    /// Friends of `email`; only the owner may list them.
    async fn retrieve_friends_list(
        &self,
        caller: Caller,
        email: &str,
    ) -> Result<Vec<UserRecord>, RelationError>;

    /// Friends shared by both users, in `email_b`'s listing order.
    async fn retrieve_common_friends(
        &self,
        caller: Caller,
        email_a: &str,
        email_b: &str,
    ) -> Result<Vec<UserRecord>, RelationError>;
}

/// Number of users in a materialized friend list. Materialization already
/// drops ids whose user row is gone, so every entry counts.
pub fn count_friends(friends: &[UserRecord]) -> usize {
    friends.len()
}
