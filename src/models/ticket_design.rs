use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "design_orientation", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "design_format", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TicketFormat {
    #[default]
    Standard,
    Compact,
    Large,
}

/// A saved visual template. Content fields (what the ticket says) and style
/// fields (how it looks) are persisted together in full; a row never carries
/// a partial design. Date, time and price are display strings here, not
/// parsed calendar/decimal types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TicketDesign {
    pub id: Uuid,
    pub name: String,
    pub template_id: String,
    pub event_name: String,
    #[sqlx(rename = "event_date")]
    pub date: String,
    #[sqlx(rename = "event_time")]
    pub time: String,
    pub location: String,
    pub ticket_number: String,
    pub ticket_type: String,
    pub price: String,
    pub qr_code: String,
    pub category: String,
    pub organizer: String,
    pub logo: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub text_color: String,
    pub font_family: String,
    pub font_size: i32,
    pub border_radius: i32,
    pub orientation: Orientation,
    pub format: TicketFormat,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full create payload: template choice, derived display name, every content
/// and style field, and the optional owner. There is no partial variant of
/// this shape on purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicketDesign {
    pub name: String,
    pub template_id: String,
    pub event_name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub ticket_number: String,
    pub ticket_type: String,
    pub price: String,
    pub qr_code: String,
    pub category: String,
    pub organizer: String,
    pub logo: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub text_color: String,
    pub font_family: String,
    pub font_size: i32,
    pub border_radius: i32,
    pub orientation: Orientation,
    pub format: TicketFormat,
    pub user_id: Option<Uuid>,
}
