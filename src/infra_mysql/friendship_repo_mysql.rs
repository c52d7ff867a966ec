use super::util::{downcast, insert_err, store_err};
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

pub struct MySqlFriendshipRepo {
    pool: MySqlPool,
}

impl MySqlFriendshipRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendshipRepo for MySqlFriendshipRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        pair: UserPair,
    ) -> Result<(), RepoError> {
        let tx = downcast(tx);

        sqlx::query("INSERT INTO friendship (user_low, user_high) VALUES (?, ?)")
            .bind(pair.min())
            .bind(pair.max())
            .execute(tx.conn())
            .await
            .map_err(insert_err("insert friendship"))?;

        Ok(())
    }

    async fn get(&self, pair: UserPair) -> Result<Option<Friendship>, RepoError> {
        let row = sqlx::query(
            "SELECT created_at FROM friendship WHERE user_low = ? AND user_high = ?",
        )
        .bind(pair.min())
        .bind(pair.max())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err("select friendship"))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let created_at = row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(store_err("decode created_at"))?;

        Ok(Some(Friendship { pair, created_at }))
    }

    async fn list_friend_ids(&self, user_id: UserId) -> Result<Vec<UserId>, RepoError> {
        sqlx::query_scalar::<_, UserId>(
            r#"
SELECT IF(user_low = ?, user_high, user_low) AS friend_id
FROM friendship
WHERE user_low = ? OR user_high = ?
ORDER BY created_at, user_low, user_high
"#,
        )
        .bind(user_id)
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err("list friend ids"))
    }
}
