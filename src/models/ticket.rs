use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "ticket_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Sold,
    #[default]
    Reserved,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub event_id: i64,
    pub holder_name: String,
    pub holder_email: String,
    pub ticket_type: String,
    pub price: Decimal,
    pub status: TicketStatus,
    pub purchase_date: DateTime<Utc>,
    pub qr_code: String,
    pub is_scanned: bool,
    pub scanned_time: Option<DateTime<Utc>>,
    pub gate_used: Option<String>,
    #[serde(rename = "ticketDesignId")]
    pub ticket_design_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTicket {
    pub event_id: i64,
    pub holder_name: String,
    pub holder_email: String,
    pub ticket_type: String,
    pub price: Decimal,
    #[serde(default)]
    pub status: TicketStatus,
    pub qr_code: String,
    #[serde(rename = "ticketDesignId", default)]
    pub ticket_design_id: Option<Uuid>,
}
