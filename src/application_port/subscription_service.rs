use crate::application_port::RelationError;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait SubscriptionService: Send + Sync {
    /// Subscribes `requestor_email` to `target_email`'s broadcasts. A block the
    /// requestor holds on the target is lifted when the two are already friends.
    async fn create_subscription(
        &self,
        caller: Caller,
        requestor_email: &str,
        target_email: &str,
    ) -> Result<(), RelationError>;
}
