use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::map_db_error;
use crate::models::{NewUser, User, UserFilter, UserPatch, UserStatus};
use crate::store::{StoreResult, UserStore};

const COLUMNS: &str = "id, name, email, password_hash, role, status, phone, avatar, \
                       permissions, last_access, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self, filter: UserFilter) -> StoreResult<Vec<User>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM users \
             WHERE ($1::user_role IS NULL OR role = $1) \
               AND ($2::user_status IS NULL OR status = $2) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(filter.role)
            .bind(filter.status)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn create(&self, new: NewUser) -> StoreResult<User> {
        let sql = format!(
            "INSERT INTO users \
             (name, email, password_hash, role, status, phone, avatar, permissions) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(new.name)
            .bind(new.email)
            .bind(new.password_hash)
            .bind(new.role)
            .bind(new.status)
            .bind(new.phone)
            .bind(new.avatar)
            .bind(new.permissions)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> StoreResult<User> {
        let sql = format!(
            "UPDATE users SET \
               name = COALESCE($2, name), \
               email = COALESCE($3, email), \
               role = COALESCE($4, role), \
               status = COALESCE($5, status), \
               phone = COALESCE($6, phone), \
               avatar = COALESCE($7, avatar), \
               permissions = COALESCE($8, permissions), \
               last_access = COALESCE($9, last_access), \
               updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.email)
            .bind(patch.role)
            .bind(patch.status)
            .bind(patch.phone)
            .bind(patch.avatar)
            .bind(patch.permissions)
            .bind(patch.last_access)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn set_status_many(&self, ids: &[Uuid], status: UserStatus) -> StoreResult<Vec<User>> {
        let sql = format!(
            "UPDATE users SET status = $2, updated_at = now() \
             WHERE id = ANY($1) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(ids)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(crate::store::StoreError::NotFound(format!("user {id}")));
        }
        Ok(())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> StoreResult<()> {
        sqlx::query("DELETE FROM users WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
