mod event;
mod ticket;
mod ticket_design;
mod user;

pub use event::PgEventStore;
pub use ticket::PgTicketStore;
pub use ticket_design::PgTicketDesignStore;
pub use user::PgUserStore;

use crate::store::StoreError;

fn map_db_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound("row not found".to_string()),
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(db.message().to_string())
        }
        other => StoreError::Database(other),
    }
}
