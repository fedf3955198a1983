pub mod memory;
pub mod pg;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    Event, EventFilter, EventPatch, EventStatus, NewEvent, NewTicket, NewTicketDesign, NewUser,
    Ticket, TicketDesign, User, UserFilter, UserPatch, UserStatus,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("entity not found: {0}")]
    NotFound(String),

    #[error("unique constraint violated: {0}")]
    Conflict(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Events are listed whole and filtered client-side today; the filter
/// parameter is the seam for pushing predicates down later.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn list(&self, filter: EventFilter) -> StoreResult<Vec<Event>>;
    async fn create(&self, new: NewEvent) -> StoreResult<Event>;
    async fn update(&self, id: i64, patch: EventPatch) -> StoreResult<Event>;
    /// One batched call; returns the canonical rows that were touched.
    async fn set_status_many(&self, ids: &[i64], status: EventStatus) -> StoreResult<Vec<Event>>;
    async fn delete(&self, id: i64) -> StoreResult<()>;
    async fn delete_many(&self, ids: &[i64]) -> StoreResult<()>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self, filter: UserFilter) -> StoreResult<Vec<User>>;
    async fn create(&self, new: NewUser) -> StoreResult<User>;
    async fn update(&self, id: Uuid, patch: UserPatch) -> StoreResult<User>;
    async fn set_status_many(&self, ids: &[Uuid], status: UserStatus) -> StoreResult<Vec<User>>;
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
    async fn delete_many(&self, ids: &[Uuid]) -> StoreResult<()>;
}

/// Designs are load-all plus create-on-save; every save is a full create,
/// there is no draft or partial update in the editing flow.
#[async_trait]
pub trait TicketDesignStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<TicketDesign>>;
    async fn create(&self, new: NewTicketDesign) -> StoreResult<TicketDesign>;
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn list_for_event(&self, event_id: i64) -> StoreResult<Vec<Ticket>>;
    async fn create(&self, new: NewTicket) -> StoreResult<Ticket>;
    /// Sold tickets grouped by event id. This is the real figure behind the
    /// occupancy column on the events screen.
    async fn sold_counts(&self) -> StoreResult<HashMap<i64, i64>>;
}
