#![allow(dead_code)]

use rapport::domain_model::*;
use rapport::domain_port::*;
use rapport::infra_memory::MemoryStore;
use rapport::server::{Repos, Server};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct Harness {
    pub server: Server,
    pub repos: Repos,
}

pub fn harness() -> Harness {
    harness_with(Repos::memory(MemoryStore::new()))
}

pub fn harness_with(repos: Repos) -> Harness {
    Harness {
        server: Server::from_repos(repos.clone(), None),
        repos,
    }
}

impl Harness {
    pub async fn user(&self, email: &str) -> UserId {
        self.repos.seed_user(email, Role::User).await.unwrap()
    }

    pub async fn admin(&self, email: &str) -> UserId {
        self.repos.seed_user(email, Role::Admin).await.unwrap()
    }

    pub async fn seed_friendship(&self, a: UserId, b: UserId) {
        let mut tx = self.repos.tx_manager.begin().await.unwrap();
        self.repos
            .friendship_repo
            .insert_in_tx(&mut *tx, UserPair::new(a, b))
            .await
            .unwrap();
        tx.commit().await.unwrap();
    }

    pub async fn seed_subscription(&self, requestor: UserId, target: UserId) {
        let mut tx = self.repos.tx_manager.begin().await.unwrap();
        self.repos
            .subscription_repo
            .insert_in_tx(&mut *tx, requestor, target)
            .await
            .unwrap();
        tx.commit().await.unwrap();
    }

    pub async fn seed_block(&self, requestor: UserId, target: UserId) {
        let mut tx = self.repos.tx_manager.begin().await.unwrap();
        self.repos
            .block_repo
            .insert_in_tx(&mut *tx, requestor, target)
            .await
            .unwrap();
        tx.commit().await.unwrap();
    }

    pub async fn friends(&self, a: UserId, b: UserId) -> bool {
        self.repos
            .friendship_repo
            .get(UserPair::new(a, b))
            .await
            .unwrap()
            .is_some()
    }

    pub async fn subscribed(&self, requestor: UserId, target: UserId) -> bool {
        self.repos
            .subscription_repo
            .get(requestor, target)
            .await
            .unwrap()
            .is_some()
    }

    pub async fn blocked(&self, requestor: UserId, target: UserId) -> bool {
        self.repos
            .block_repo
            .get(requestor, target)
            .await
            .unwrap()
            .is_some()
    }
}

pub fn emails(users: &[UserRecord]) -> Vec<&str> {
    users.iter().map(|u| u.email.as_str()).collect()
}

/// Block repo whose writes or listing can be made to fail on demand.
pub struct FlakyBlockRepo {
    inner: Arc<dyn BlockRepo>,
    pub fail_insert: AtomicBool,
    pub fail_list: AtomicBool,
}

impl FlakyBlockRepo {
    pub fn new(inner: Arc<dyn BlockRepo>) -> Self {
        Self {
            inner,
            fail_insert: AtomicBool::new(false),
            fail_list: AtomicBool::new(false),
        }
    }
}

#[async_trait::async_trait]
impl BlockRepo for FlakyBlockRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), RepoError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(RepoError::Store("injected insert failure".to_string()));
        }
        self.inner.insert_in_tx(tx, requestor, target).await
    }

    async fn get(
        &self,
        requestor: UserId,
        target: UserId,
    ) -> Result<Option<BlockRelationship>, RepoError> {
        self.inner.get(requestor, target).await
    }

    async fn delete_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), RepoError> {
        self.inner.delete_in_tx(tx, requestor, target).await
    }

    async fn list_requestor_ids(&self, target: UserId) -> Result<Vec<UserId>, RepoError> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(RepoError::Store("injected list failure".to_string()));
        }
        self.inner.list_requestor_ids(target).await
    }
}

/// Memory-backed harness whose block repo is a `FlakyBlockRepo`.
pub fn flaky_harness() -> (Harness, Arc<FlakyBlockRepo>) {
    let mut repos = Repos::memory(MemoryStore::new());
    let flaky = Arc::new(FlakyBlockRepo::new(repos.block_repo.clone()));
    repos.block_repo = flaky.clone() as Arc<dyn BlockRepo>;
    (harness_with(repos), flaky)
}

/// Relationship repos that, once their row is staged, commit the same row in
/// a second transaction, as a concurrent request would.
pub struct RacingFriendshipRepo {
    inner: Arc<dyn FriendshipRepo>,
    tx_manager: Arc<dyn TxManager>,
}

#[async_trait::async_trait]
impl FriendshipRepo for RacingFriendshipRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        pair: UserPair,
    ) -> Result<(), RepoError> {
        self.inner.insert_in_tx(tx, pair).await?;
        let mut rival = self.tx_manager.begin().await.unwrap();
        self.inner.insert_in_tx(&mut *rival, pair).await?;
        rival.commit().await.unwrap();
        Ok(())
    }

    async fn get(&self, pair: UserPair) -> Result<Option<Friendship>, RepoError> {
        self.inner.get(pair).await
    }

    async fn list_friend_ids(&self, user_id: UserId) -> Result<Vec<UserId>, RepoError> {
        self.inner.list_friend_ids(user_id).await
    }
}

pub struct RacingSubscriptionRepo {
    inner: Arc<dyn SubscriptionRepo>,
    tx_manager: Arc<dyn TxManager>,
}

#[async_trait::async_trait]
impl SubscriptionRepo for RacingSubscriptionRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), RepoError> {
        self.inner.insert_in_tx(tx, requestor, target).await?;
        let mut rival = self.tx_manager.begin().await.unwrap();
        self.inner
            .insert_in_tx(&mut *rival, requestor, target)
            .await?;
        rival.commit().await.unwrap();
        Ok(())
    }

    async fn get(
        &self,
        requestor: UserId,
        target: UserId,
    ) -> Result<Option<Subscription>, RepoError> {
        self.inner.get(requestor, target).await
    }

    async fn delete_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), RepoError> {
        self.inner.delete_in_tx(tx, requestor, target).await
    }

    async fn list_subscriber_ids(&self, target: UserId) -> Result<Vec<UserId>, RepoError> {
        self.inner.list_subscriber_ids(target).await
    }
}

pub struct RacingBlockRepo {
    inner: Arc<dyn BlockRepo>,
    tx_manager: Arc<dyn TxManager>,
}

#[async_trait::async_trait]
impl BlockRepo for RacingBlockRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), RepoError> {
        self.inner.insert_in_tx(tx, requestor, target).await?;
        let mut rival = self.tx_manager.begin().await.unwrap();
        self.inner
            .insert_in_tx(&mut *rival, requestor, target)
            .await?;
        rival.commit().await.unwrap();
        Ok(())
    }

    async fn get(
        &self,
        requestor: UserId,
        target: UserId,
    ) -> Result<Option<BlockRelationship>, RepoError> {
        self.inner.get(requestor, target).await
    }

    async fn delete_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), RepoError> {
        self.inner.delete_in_tx(tx, requestor, target).await
    }

    async fn list_requestor_ids(&self, target: UserId) -> Result<Vec<UserId>, RepoError> {
        self.inner.list_requestor_ids(target).await
    }
}

/// Memory-backed harness where every relationship insert loses a race to a
/// concurrent commit of the same row.
pub fn racing_harness() -> Harness {
    let mut repos = Repos::memory(MemoryStore::new());
    let tx_manager = repos.tx_manager.clone();
    repos.friendship_repo = Arc::new(RacingFriendshipRepo {
        inner: repos.friendship_repo.clone(),
        tx_manager: tx_manager.clone(),
    });
    repos.subscription_repo = Arc::new(RacingSubscriptionRepo {
        inner: repos.subscription_repo.clone(),
        tx_manager: tx_manager.clone(),
    });
    repos.block_repo = Arc::new(RacingBlockRepo {
        inner: repos.block_repo.clone(),
        tx_manager,
    });
    harness_with(repos)
}
