use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_model::{Role, UserId};
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::logger::*;
use crate::settings::{Settings, StoreBackend};
use anyhow::anyhow;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::sync::Arc;

/// Storage handles shared by every service.
#[derive(Clone)]
pub struct Repos {
    pub user_repo: Arc<dyn UserRepo>,
    pub friendship_repo: Arc<dyn FriendshipRepo>,
    pub subscription_repo: Arc<dyn SubscriptionRepo>,
    pub block_repo: Arc<dyn BlockRepo>,
    pub tx_manager: Arc<dyn TxManager>,
}

impl Repos {
    pub fn memory(store: MemoryStore) -> Self {
        Repos {
            user_repo: Arc::new(MemoryUserRepo::new(store.clone())),
            friendship_repo: Arc::new(MemoryFriendshipRepo::new(store.clone())),
            subscription_repo: Arc::new(MemorySubscriptionRepo::new(store.clone())),
            block_repo: Arc::new(MemoryBlockRepo::new(store.clone())),
            tx_manager: Arc::new(MemoryTxManager::new(store)),
        }
    }

    pub fn mysql(pool: MySqlPool) -> Self {
        Repos {
            user_repo: Arc::new(MySqlUserRepo::new(pool.clone())),
            friendship_repo: Arc::new(MySqlFriendshipRepo::new(pool.clone())),
            subscription_repo: Arc::new(MySqlSubscriptionRepo::new(pool.clone())),
            block_repo: Arc::new(MySqlBlockRepo::new(pool.clone())),
            tx_manager: Arc::new(MySqlTxManager::new(pool)),
        }
    }

    /// Inserts a user in its own transaction.
    pub async fn seed_user(&self, email: &str, role: Role) -> anyhow::Result<UserId> {
        let mut tx = self.tx_manager.begin().await?;
        let user_id = self
            .user_repo
            .create_in_tx(&mut *tx, email, role)
            .await
            .map_err(|e| anyhow!("seed {email}: {e}"))?;
        tx.commit().await?;
        Ok(user_id)
    }
}

pub struct Server {
    pub repos: Repos,
    pub friendship_service: Arc<dyn FriendshipService>,
    pub subscription_service: Arc<dyn SubscriptionService>,
    pub block_service: Arc<dyn BlockService>,
    pub notification_service: Arc<dyn NotificationService>,
    pool: Option<MySqlPool>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        match settings.store.backend {
            StoreBackend::Memory => {
                info!("using in-memory store");
                Ok(Self::from_repos(Repos::memory(MemoryStore::new()), None))
            }
            StoreBackend::Mysql => {
                let dsn = settings
                    .store
                    .dsn
                    .as_deref()
                    .ok_or_else(|| anyhow!("store.dsn is required for the mysql backend"))?;
                let pool = MySqlPoolOptions::new()
                    .max_connections(settings.store.max_connections)
                    .connect(dsn)
                    .await?;
                migrate(&pool).await?;
                info!(max_connections = settings.store.max_connections, "connected to mysql");
                Ok(Self::from_repos(Repos::mysql(pool.clone()), Some(pool)))
            }
        }
    }

    pub fn from_repos(repos: Repos, pool: Option<MySqlPool>) -> Self {
        let friendship_service: Arc<dyn FriendshipService> =
            Arc::new(RealFriendshipService::new(
                repos.user_repo.clone(),
                repos.friendship_repo.clone(),
                repos.block_repo.clone(),
                repos.tx_manager.clone(),
            ));
        let subscription_service: Arc<dyn SubscriptionService> =
            Arc::new(RealSubscriptionService::new(
                repos.user_repo.clone(),
                repos.subscription_repo.clone(),
                repos.friendship_repo.clone(),
                repos.block_repo.clone(),
                repos.tx_manager.clone(),
            ));
        let block_service: Arc<dyn BlockService> = Arc::new(RealBlockService::new(
            repos.user_repo.clone(),
            repos.block_repo.clone(),
            repos.friendship_repo.clone(),
            repos.subscription_repo.clone(),
            repos.tx_manager.clone(),
        ));
        let notification_service: Arc<dyn NotificationService> =
            Arc::new(RealNotificationService::new(
                repos.user_repo.clone(),
                repos.friendship_repo.clone(),
                repos.subscription_repo.clone(),
                repos.block_repo.clone(),
            ));

        Server {
            repos,
            friendship_service,
            subscription_service,
            block_service,
            notification_service,
            pool,
        }
    }

    pub async fn shutdown(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("mysql pool closed");
        }
    }
}
