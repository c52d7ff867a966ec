use super::memory_store::{MemoryStore, Write, downcast};
use crate::domain_model::*;
use crate::domain_port::*;

pub struct MemoryUserRepo {
    store: MemoryStore,
}

impl MemoryUserRepo {
    pub fn new(store: MemoryStore) -> Self {
        MemoryUserRepo { store }
    }
}

#[async_trait::async_trait]
impl UserRepo for MemoryUserRepo {
    async fn create_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        email: &str,
        role: Role,
    ) -> Result<UserId, RepoError> {
        let tx = downcast(tx);
        let user_id = self.store.next_user_id();
        tx.stage(Write::InsertUser {
            user_id,
            email: email.to_string(),
            role,
        })
        .await?;
        Ok(user_id)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepoError> {
        Ok(self
            .store
            .read(|t| {
                t.users
                    .iter()
                    .find(|u| u.email.eq_ignore_ascii_case(email))
                    .cloned()
            })
            .await)
    }

    async fn get_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>, RepoError> {
        Ok(self
            .store
            .read(|t| t.users.iter().find(|u| u.user_id == user_id).cloned())
            .await)
    }

    async fn get_by_ids(&self, ids: &[UserId]) -> Result<Vec<UserRecord>, RepoError> {
        Ok(self
            .store
            .read(|t| {
                ids.iter()
                    .filter_map(|id| t.users.iter().find(|u| u.user_id == *id).cloned())
                    .collect::<Vec<_>>()
            })
            .await)
    }

    async fn get_by_emails(&self, emails: &[String]) -> Result<Vec<UserRecord>, RepoError> {
        Ok(self
            .store
            .read(|t| {
                emails
                    .iter()
                    .filter_map(|email| {
                        t.users
                            .iter()
                            .find(|u| u.email.eq_ignore_ascii_case(email))
                            .cloned()
                    })
                    .collect::<Vec<_>>()
            })
            .await)
    }
}
