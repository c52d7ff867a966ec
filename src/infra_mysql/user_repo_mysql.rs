use super::util::{downcast, insert_err, store_err};
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use std::collections::HashMap;

pub struct MySqlUserRepo {
    pool: MySqlPool,
}

impl MySqlUserRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserRepo { pool }
    }
}

fn user_from_row(row: &MySqlRow) -> Result<UserRecord, RepoError> {
    let role = row
        .try_get::<String, _>("role")
        .map_err(store_err("decode role"))?
        .parse::<Role>()
        .map_err(RepoError::Store)?;

    Ok(UserRecord {
        user_id: row
            .try_get::<UserId, _>("user_id")
            .map_err(store_err("decode user_id"))?,
        email: row
            .try_get::<String, _>("email")
            .map_err(store_err("decode email"))?,
        role,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(store_err("decode created_at"))?,
    })
}

#[async_trait::async_trait]
impl UserRepo for MySqlUserRepo {
    async fn create_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        email: &str,
        role: Role,
    ) -> Result<UserId, RepoError> {
        let tx = downcast(tx);

        let res = sqlx::query("INSERT INTO user (email, role) VALUES (?, ?)")
            .bind(email)
            .bind(role.as_str())
            .execute(tx.conn())
            .await
            .map_err(insert_err("insert user"))?;

        Ok(UserId(res.last_insert_id() as i64))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepoError> {
        let row = sqlx::query("SELECT user_id, email, role, created_at FROM user WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err("select user by email"))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>, RepoError> {
        let row = sqlx::query("SELECT user_id, email, role, created_at FROM user WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err("select user by id"))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_by_ids(&self, ids: &[UserId]) -> Result<Vec<UserRecord>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<MySql>::new(
            "SELECT user_id, email, role, created_at FROM user WHERE user_id IN (",
        );
        let mut list = qb.separated(", ");
        for id in ids {
            list.push_bind(*id);
        }
        list.push_unseparated(")");

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(store_err("select users by ids"))?;

        let mut by_id = HashMap::with_capacity(rows.len());
        for row in &rows {
            let user = user_from_row(row)?;
            by_id.insert(user.user_id, user);
        }

        // IN (...) has no defined order; restore the caller's
        Ok(ids.iter().filter_map(|id| by_id.get(id).cloned()).collect())
    }

    async fn get_by_emails(&self, emails: &[String]) -> Result<Vec<UserRecord>, RepoError> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<MySql>::new(
            "SELECT user_id, email, role, created_at FROM user WHERE email IN (",
        );
        let mut list = qb.separated(", ");
        for email in emails {
            list.push_bind(email.as_str());
        }
        list.push_unseparated(")");

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(store_err("select users by emails"))?;

        let mut by_email = HashMap::with_capacity(rows.len());
        for row in &rows {
            let user = user_from_row(row)?;
            by_email.insert(user.email.to_ascii_lowercase(), user);
        }

        // the email column compares case-insensitively
        Ok(emails
            .iter()
            .filter_map(|email| by_email.get(&email.to_ascii_lowercase()).cloned())
            .collect())
    }
}
