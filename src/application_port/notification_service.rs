use crate::application_port::RelationError;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait NotificationService: Send + Sync {
    /// Everyone who should receive a broadcast of `text` from `sender_email`:
    /// friends, subscribers and mentioned users, minus users blocking the sender.
    async fn get_update_recipients(
        &self,
        caller: Caller,
        sender_email: &str,
        text: &str,
    ) -> Result<Vec<UserRecord>, RelationError>;
}
