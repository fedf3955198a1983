use async_trait::async_trait;
use sqlx::PgPool;

use super::map_db_error;
use crate::models::{NewTicketDesign, TicketDesign};
use crate::store::{StoreResult, TicketDesignStore};

const COLUMNS: &str = "id, name, template_id, event_name, event_date, event_time, location, \
                       ticket_number, ticket_type, price, qr_code, category, organizer, logo, \
                       primary_color, secondary_color, background_color, text_color, \
                       font_family, font_size, border_radius, orientation, format, user_id, \
                       created_at, updated_at";

#[derive(Clone)]
pub struct PgTicketDesignStore {
    pool: PgPool,
}

impl PgTicketDesignStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketDesignStore for PgTicketDesignStore {
    async fn list(&self) -> StoreResult<Vec<TicketDesign>> {
        let sql = format!("SELECT {COLUMNS} FROM ticket_designs ORDER BY created_at");
        sqlx::query_as::<_, TicketDesign>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn create(&self, new: NewTicketDesign) -> StoreResult<TicketDesign> {
        let sql = format!(
            "INSERT INTO ticket_designs \
             (name, template_id, event_name, event_date, event_time, location, ticket_number, \
              ticket_type, price, qr_code, category, organizer, logo, primary_color, \
              secondary_color, background_color, text_color, font_family, font_size, \
              border_radius, orientation, format, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
                     $17, $18, $19, $20, $21, $22, $23) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TicketDesign>(&sql)
            .bind(new.name)
            .bind(new.template_id)
            .bind(new.event_name)
            .bind(new.date)
            .bind(new.time)
            .bind(new.location)
            .bind(new.ticket_number)
            .bind(new.ticket_type)
            .bind(new.price)
            .bind(new.qr_code)
            .bind(new.category)
            .bind(new.organizer)
            .bind(new.logo)
            .bind(new.primary_color)
            .bind(new.secondary_color)
            .bind(new.background_color)
            .bind(new.text_color)
            .bind(new.font_family)
            .bind(new.font_size)
            .bind(new.border_radius)
            .bind(new.orientation)
            .bind(new.format)
            .bind(new.user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
