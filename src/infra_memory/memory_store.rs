use crate::domain_model::*;
use crate::domain_port::{RepoError, StorageTx, TxManager};
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Default)]
pub(crate) struct Tables {
    pub users: Vec<UserRecord>,
    pub friendships: Vec<Friendship>,
    pub subscriptions: Vec<Subscription>,
    pub blocks: Vec<BlockRelationship>,
}

#[derive(Debug, Clone)]
pub(crate) enum Write {
    InsertUser { user_id: UserId, email: String, role: Role },
    InsertFriendship(UserPair),
    InsertSubscription(UserId, UserId),
    DeleteSubscription(UserId, UserId),
    InsertBlock(UserId, UserId),
    DeleteBlock(UserId, UserId),
}

impl Tables {
    /// Applies one write, enforcing the same constraints as the SQL schema.
    fn apply(&mut self, write: &Write) -> Result<(), RepoError> {
        let now = Utc::now();
        match write {
            Write::InsertUser {
                user_id,
                email,
                role,
            } => {
                // mirrors the ascii, case-insensitive email column
                if !email.is_ascii() {
                    return Err(RepoError::Store(format!("non-ascii email {email:?}")));
                }
                if self.users.iter().any(|u| {
                    u.user_id == *user_id || u.email.eq_ignore_ascii_case(email)
                }) {
                    return Err(RepoError::AlreadyExists);
                }
                self.users.push(UserRecord {
                    user_id: *user_id,
                    email: email.clone(),
                    role: *role,
                    created_at: now,
                });
            }
            Write::InsertFriendship(pair) => {
                if pair.min() == pair.max() {
                    return Err(RepoError::Store("friendship with self".to_string()));
                }
                if self.friendships.iter().any(|f| f.pair == *pair) {
                    return Err(RepoError::AlreadyExists);
                }
                self.friendships.push(Friendship {
                    pair: *pair,
                    created_at: now,
                });
            }
            Write::InsertSubscription(requestor, target) => {
                if requestor == target {
                    return Err(RepoError::Store("subscription to self".to_string()));
                }
                if self
                    .subscriptions
                    .iter()
                    .any(|s| s.requestor == *requestor && s.target == *target)
                {
                    return Err(RepoError::AlreadyExists);
                }
                self.subscriptions.push(Subscription {
                    requestor: *requestor,
                    target: *target,
                    created_at: now,
                });
            }
            Write::DeleteSubscription(requestor, target) => {
                self.subscriptions
                    .retain(|s| !(s.requestor == *requestor && s.target == *target));
            }
            Write::InsertBlock(requestor, target) => {
                if requestor == target {
                    return Err(RepoError::Store("block on self".to_string()));
                }
                if self
                    .blocks
                    .iter()
                    .any(|b| b.requestor == *requestor && b.target == *target)
                {
                    return Err(RepoError::AlreadyExists);
                }
                self.blocks.push(BlockRelationship {
                    requestor: *requestor,
                    target: *target,
                    created_at: now,
                });
            }
            Write::DeleteBlock(requestor, target) => {
                self.blocks
                    .retain(|b| !(b.requestor == *requestor && b.target == *target));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Inner {
    tables: Mutex<Tables>,
    last_user_id: AtomicI64,
}

/// Process-local relationship store. Cloning shares the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> R {
        let tables = self.inner.tables.lock().await;
        f(&tables)
    }

    pub(crate) fn next_user_id(&self) -> UserId {
        UserId(self.inner.last_user_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

pub struct MemoryTxManager {
    store: MemoryStore,
}

impl MemoryTxManager {
    pub fn new(store: MemoryStore) -> Self {
        MemoryTxManager { store }
    }
}

#[async_trait::async_trait]
impl TxManager for MemoryTxManager {
    async fn begin<'t>(&'t self) -> anyhow::Result<Box<dyn StorageTx<'t> + 't>> {
        Ok(Box::new(MemoryTx::new(&self.store)))
    }
}

/// Writes are staged and checked against committed state plus earlier
/// staged writes; `commit` applies them all under one lock or none.
pub struct MemoryTx<'t> {
    store: &'t MemoryStore,
    staged: Vec<Write>,
}

impl<'t> MemoryTx<'t> {
    pub fn new(store: &'t MemoryStore) -> Self {
        MemoryTx {
            store,
            staged: Vec::new(),
        }
    }

    pub(crate) async fn stage(&mut self, write: Write) -> Result<(), RepoError> {
        let mut view = self.store.read(Tables::clone).await;
        for staged in &self.staged {
            view.apply(staged)?;
        }
        view.apply(&write)?;
        self.staged.push(write);
        Ok(())
    }
}

#[async_trait::async_trait]
impl<'t> StorageTx<'t> for MemoryTx<'t> {
    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        let mut tables = self.store.inner.tables.lock().await;
        let mut next = tables.clone();
        // a concurrent commit may have taken a unique key since staging
        for write in &self.staged {
            next.apply(write).map_err(anyhow::Error::new)?;
        }
        *tables = next;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> anyhow::Result<()> {
        Ok(())
    }
}

pub(crate) fn downcast<'a, 't>(tx: &'a mut dyn StorageTx<'t>) -> &'a mut MemoryTx<'t> {
    // SAFETY: memory repos are only ever handed transactions opened by
    // `MemoryTxManager`, so the concrete type behind the trait object is `MemoryTx`.
    unsafe {
        let p = tx as *mut dyn StorageTx<'t>;
        let p = p as *mut MemoryTx<'t>;
        &mut *p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: i64, b: i64) -> UserPair {
        UserPair::new(UserId(a), UserId(b))
    }

    #[tokio::test]
    async fn commit_applies_staged_writes() {
        let store = MemoryStore::new();
        let mut tx = MemoryTx::new(&store);
        tx.stage(Write::InsertFriendship(pair(1, 2))).await.unwrap();
        tx.stage(Write::InsertBlock(UserId(3), UserId(1)))
            .await
            .unwrap();
        assert!(store.read(|t| t.friendships.is_empty()).await);

        Box::new(tx).commit().await.unwrap();
        assert_eq!(store.read(|t| t.friendships.len()).await, 1);
        assert_eq!(store.read(|t| t.blocks.len()).await, 1);
    }

    #[tokio::test]
    async fn rollback_discards_staged_writes() {
        let store = MemoryStore::new();
        let mut tx = MemoryTx::new(&store);
        tx.stage(Write::InsertSubscription(UserId(1), UserId(2)))
            .await
            .unwrap();
        Box::new(tx).rollback().await.unwrap();
        assert!(store.read(|t| t.subscriptions.is_empty()).await);
    }

    #[tokio::test]
    async fn duplicate_within_one_tx_is_rejected_on_stage() {
        let store = MemoryStore::new();
        let mut tx = MemoryTx::new(&store);
        tx.stage(Write::InsertFriendship(pair(1, 2))).await.unwrap();
        let err = tx
            .stage(Write::InsertFriendship(pair(2, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::AlreadyExists));
    }

    #[tokio::test]
    async fn concurrent_duplicate_fails_at_commit() {
        let store = MemoryStore::new();
        let mut first = MemoryTx::new(&store);
        let mut second = MemoryTx::new(&store);
        first.stage(Write::InsertBlock(UserId(1), UserId(2))).await.unwrap();
        second.stage(Write::InsertBlock(UserId(1), UserId(2))).await.unwrap();

        Box::new(first).commit().await.unwrap();
        let err = Box::new(second).commit().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RepoError>(),
            Some(RepoError::AlreadyExists)
        ));
        assert_eq!(store.read(|t| t.blocks.len()).await, 1);
    }

    #[tokio::test]
    async fn user_email_is_unique_regardless_of_case() {
        let store = MemoryStore::new();
        let mut tx = MemoryTx::new(&store);
        tx.stage(Write::InsertUser {
            user_id: UserId(1),
            email: "kate@example.com".to_string(),
            role: Role::User,
        })
        .await
        .unwrap();
        let err = tx
            .stage(Write::InsertUser {
                user_id: UserId(2),
                email: "Kate@Example.COM".to_string(),
                role: Role::User,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::AlreadyExists));
    }

    #[tokio::test]
    async fn delete_then_insert_in_one_tx() {
        let store = MemoryStore::new();
        let mut seed = MemoryTx::new(&store);
        seed.stage(Write::InsertSubscription(UserId(1), UserId(2)))
            .await
            .unwrap();
        Box::new(seed).commit().await.unwrap();

        let mut tx = MemoryTx::new(&store);
        tx.stage(Write::DeleteSubscription(UserId(1), UserId(2)))
            .await
            .unwrap();
        tx.stage(Write::InsertSubscription(UserId(1), UserId(2)))
            .await
            .unwrap();
        Box::new(tx).commit().await.unwrap();
        assert_eq!(store.read(|t| t.subscriptions.len()).await, 1);
    }
}
