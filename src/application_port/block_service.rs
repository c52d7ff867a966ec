use crate::application_port::RelationError;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait BlockService: Send + Sync {
    /// Blocks `target_email` on behalf of `requestor_email`, dropping any
    /// subscription the requestor holds on the target.
    async fn create_block_relationship(
        &self,
        caller: Caller,
        requestor_email: &str,
        target_email: &str,
    ) -> Result<(), RelationError>;
}
