use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use super::map_db_error;
use crate::models::{NewTicket, Ticket};
use crate::store::{StoreResult, TicketStore};

const COLUMNS: &str = "id, event_id, holder_name, holder_email, ticket_type, price, status, \
                       purchase_date, qr_code, is_scanned, scanned_time, gate_used, \
                       ticket_design_id, created_at, updated_at";

#[derive(Clone)]
pub struct PgTicketStore {
    pool: PgPool,
}

impl PgTicketStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketStore for PgTicketStore {
    async fn list_for_event(&self, event_id: i64) -> StoreResult<Vec<Ticket>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM tickets WHERE event_id = $1 ORDER BY purchase_date"
        );
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn create(&self, new: NewTicket) -> StoreResult<Ticket> {
        let sql = format!(
            "INSERT INTO tickets \
             (event_id, holder_name, holder_email, ticket_type, price, status, qr_code, \
              ticket_design_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(new.event_id)
            .bind(new.holder_name)
            .bind(new.holder_email)
            .bind(new.ticket_type)
            .bind(new.price)
            .bind(new.status)
            .bind(new.qr_code)
            .bind(new.ticket_design_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn sold_counts(&self) -> StoreResult<HashMap<i64, i64>> {
        let rows: Vec<(i64, i64)> = sqlx::query_as(
            "SELECT event_id, COUNT(*) FROM tickets WHERE status = 'sold' GROUP BY event_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().collect())
    }
}
