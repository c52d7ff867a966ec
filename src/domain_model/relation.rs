use crate::domain_model::{UserId, UserPair};
use chrono::{DateTime, Utc};

/// Mutual friendship. Existence of the pair means both sides are friends.
#[derive(Debug, Clone)]
pub struct Friendship {
    pub pair: UserPair,
    pub created_at: DateTime<Utc>,
}

/// `requestor` receives `target`'s broadcasts.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub requestor: UserId,
    pub target: UserId,
    pub created_at: DateTime<Utc>,
}

/// `requestor` opts out of `target`'s broadcasts.
#[derive(Debug, Clone)]
pub struct BlockRelationship {
    pub requestor: UserId,
    pub target: UserId,
    pub created_at: DateTime<Utc>,
}
