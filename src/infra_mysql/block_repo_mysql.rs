use super::util::{downcast, insert_err, store_err};
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

pub struct MySqlBlockRepo {
    pool: MySqlPool,
}

impl MySqlBlockRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl BlockRepo for MySqlBlockRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), RepoError> {
        let tx = downcast(tx);

        sqlx::query("INSERT INTO block_relationship (requestor_id, target_id) VALUES (?, ?)")
            .bind(requestor)
            .bind(target)
            .execute(tx.conn())
            .await
            .map_err(insert_err("insert block"))?;

        Ok(())
    }

    async fn get(
        &self,
        requestor: UserId,
        target: UserId,
    ) -> Result<Option<BlockRelationship>, RepoError> {
        let row = sqlx::query(
            "SELECT created_at FROM block_relationship WHERE requestor_id = ? AND target_id = ?",
        )
        .bind(requestor)
        .bind(target)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err("select block"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(BlockRelationship {
            requestor,
            target,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(store_err("decode created_at"))?,
        }))
    }

    async fn delete_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), RepoError> {
        let tx = downcast(tx);

        sqlx::query("DELETE FROM block_relationship WHERE requestor_id = ? AND target_id = ?")
            .bind(requestor)
            .bind(target)
            .execute(tx.conn())
            .await
            .map_err(store_err("delete block"))?;

        Ok(())
    }

    async fn list_requestor_ids(&self, target: UserId) -> Result<Vec<UserId>, RepoError> {
        sqlx::query_scalar::<_, UserId>(
            "SELECT requestor_id FROM block_relationship WHERE target_id = ? ORDER BY created_at, requestor_id",
        )
        .bind(target)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err("list blocking requestor ids"))
    }
}
