use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "event_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Selling,
    Upcoming,
    #[default]
    Draft,
}

/// Calendar date and time-of-day are kept as separate columns; display
/// formatting belongs to the consuming screen.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(rename = "event_date")]
    pub date: NaiveDate,
    #[sqlx(rename = "event_time")]
    pub time: NaiveTime,
    pub location: String,
    pub capacity: i32,
    pub price: Decimal,
    pub status: EventStatus,
    pub category: Option<String>,
    pub organizer: Option<String>,
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub capacity: i32,
    pub price: Decimal,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub price: Option<Decimal>,
    pub status: Option<EventStatus>,
    pub category: Option<String>,
    pub organizer: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EventFilter {
    pub status: Option<EventStatus>,
}
