use async_trait::async_trait;
use sqlx::PgPool;

use super::map_db_error;
use crate::models::{Event, EventFilter, EventPatch, EventStatus, NewEvent};
use crate::store::{EventStore, StoreResult};

const COLUMNS: &str = "id, name, description, event_date, event_time, location, capacity, \
                       price, status, category, organizer, logo, created_at, updated_at";

#[derive(Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn list(&self, filter: EventFilter) -> StoreResult<Vec<Event>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM events \
             WHERE ($1::event_status IS NULL OR status = $1) \
             ORDER BY event_date, event_time"
        );
        sqlx::query_as::<_, Event>(&sql)
            .bind(filter.status)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn create(&self, new: NewEvent) -> StoreResult<Event> {
        let sql = format!(
            "INSERT INTO events \
             (name, description, event_date, event_time, location, capacity, price, status, \
              category, organizer, logo) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&sql)
            .bind(new.name)
            .bind(new.description)
            .bind(new.date)
            .bind(new.time)
            .bind(new.location)
            .bind(new.capacity)
            .bind(new.price)
            .bind(new.status)
            .bind(new.category)
            .bind(new.organizer)
            .bind(new.logo)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn update(&self, id: i64, patch: EventPatch) -> StoreResult<Event> {
        let sql = format!(
            "UPDATE events SET \
               name = COALESCE($2, name), \
               description = COALESCE($3, description), \
               event_date = COALESCE($4, event_date), \
               event_time = COALESCE($5, event_time), \
               location = COALESCE($6, location), \
               capacity = COALESCE($7, capacity), \
               price = COALESCE($8, price), \
               status = COALESCE($9, status), \
               category = COALESCE($10, category), \
               organizer = COALESCE($11, organizer), \
               logo = COALESCE($12, logo), \
               updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.description)
            .bind(patch.date)
            .bind(patch.time)
            .bind(patch.location)
            .bind(patch.capacity)
            .bind(patch.price)
            .bind(patch.status)
            .bind(patch.category)
            .bind(patch.organizer)
            .bind(patch.logo)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn set_status_many(&self, ids: &[i64], status: EventStatus) -> StoreResult<Vec<Event>> {
        let sql = format!(
            "UPDATE events SET status = $2, updated_at = now() \
             WHERE id = ANY($1) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&sql)
            .bind(ids)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(crate::store::StoreError::NotFound(format!("event {id}")));
        }
        Ok(())
    }

    async fn delete_many(&self, ids: &[i64]) -> StoreResult<()> {
        sqlx::query("DELETE FROM events WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
