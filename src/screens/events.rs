use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::info;

use crate::context::AuthContext;
use crate::models::{Event, EventFilter, EventPatch, EventStatus, NewEvent};
use crate::screens::{matches, ScreenError};
use crate::store::{EventStore, TicketStore};

/// The events table: full collection held locally, search and selection
/// applied in memory, every mutation reconciled from the store's canonical
/// response before local rows change.
pub struct EventsScreen {
    events: Arc<dyn EventStore>,
    tickets: Arc<dyn TicketStore>,
    auth: AuthContext,
    rows: Vec<Event>,
    selected: BTreeSet<i64>,
    search: String,
}

impl EventsScreen {
    pub fn new(
        events: Arc<dyn EventStore>,
        tickets: Arc<dyn TicketStore>,
        auth: AuthContext,
    ) -> Self {
        Self {
            events,
            tickets,
            auth,
            rows: Vec::new(),
            selected: BTreeSet::new(),
            search: String::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), ScreenError> {
        self.rows = self.events.list(EventFilter::default()).await?;
        Ok(())
    }

    pub fn rows(&self) -> &[Event] {
        &self.rows
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Rows matching the search term, OR'd across name and category.
    pub fn visible(&self) -> Vec<&Event> {
        if self.search.is_empty() {
            return self.rows.iter().collect();
        }
        let needle = self.search.to_lowercase();
        self.rows
            .iter()
            .filter(|e| {
                matches(&e.name, &needle)
                    || e.category.as_deref().map_or(false, |c| matches(c, &needle))
            })
            .collect()
    }

    pub fn toggle_select(&mut self, id: i64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn selection(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    pub async fn create(&mut self, new: NewEvent) -> Result<Event, ScreenError> {
        let created = self.events.create(new).await?;
        self.rows.push(created.clone());
        Ok(created)
    }

    pub async fn update(&mut self, id: i64, patch: EventPatch) -> Result<Event, ScreenError> {
        let updated = self.events.update(id, patch).await?;
        if let Some(row) = self.rows.iter_mut().find(|e| e.id == id) {
            *row = updated.clone();
        }
        Ok(updated)
    }

    pub async fn set_status(&mut self, id: i64, status: EventStatus) -> Result<Event, ScreenError> {
        let patch = EventPatch {
            status: Some(status),
            ..EventPatch::default()
        };
        self.update(id, patch).await
    }

    /// Applies one status to every selected event in a single batched call,
    /// then clears the selection.
    pub async fn set_status_selected(&mut self, status: EventStatus) -> Result<usize, ScreenError> {
        let ids = self.selection();
        if ids.is_empty() {
            return Ok(0);
        }
        let touched = self.events.set_status_many(&ids, status).await?;
        for event in &touched {
            if let Some(row) = self.rows.iter_mut().find(|e| e.id == event.id) {
                *row = event.clone();
            }
        }
        self.selected.clear();
        info!(count = touched.len(), ?status, "bulk event status change");
        Ok(touched.len())
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), ScreenError> {
        if !self.auth.is_admin() {
            return Err(ScreenError::Forbidden);
        }
        self.events.delete(id).await?;
        self.rows.retain(|e| e.id != id);
        self.selected.remove(&id);
        Ok(())
    }

    /// Irreversible; refuses to run until the caller confirms.
    pub async fn delete_selected(&mut self, confirmed: bool) -> Result<usize, ScreenError> {
        if !self.auth.is_admin() {
            return Err(ScreenError::Forbidden);
        }
        if !confirmed {
            return Err(ScreenError::ConfirmationRequired);
        }
        let ids = self.selection();
        if ids.is_empty() {
            return Ok(0);
        }
        self.events.delete_many(&ids).await?;
        self.rows.retain(|e| !ids.contains(&e.id));
        self.selected.clear();
        info!(count = ids.len(), "bulk event delete");
        Ok(ids.len())
    }

    /// Sold tickets per event id, from persisted tickets.
    pub async fn sold_counts(&self) -> Result<HashMap<i64, i64>, ScreenError> {
        Ok(self.tickets.sold_counts().await?)
    }
}
