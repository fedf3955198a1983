use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{
    Event, EventFilter, EventPatch, EventStatus, NewEvent, NewTicket, NewTicketDesign, NewUser,
    Ticket, TicketDesign, TicketStatus, User, UserFilter, UserPatch, UserStatus,
};
use crate::store::{
    EventStore, StoreError, StoreResult, TicketDesignStore, TicketStore, UserStore,
};

/// In-memory store used by tests and local embedding. Mirrors the schema's
/// guarantees: unique user email, unique ticket qr_code, tickets cascade with
/// their event, design ownership nulls out when the owner is deleted.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    events: Vec<Event>,
    users: Vec<User>,
    designs: Vec<TicketDesign>,
    tickets: Vec<Ticket>,
    next_event_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn list(&self, filter: EventFilter) -> StoreResult<Vec<Event>> {
        let inner = self.lock();
        Ok(inner
            .events
            .iter()
            .filter(|e| filter.status.map_or(true, |s| e.status == s))
            .cloned()
            .collect())
    }

    async fn create(&self, new: NewEvent) -> StoreResult<Event> {
        let mut inner = self.lock();
        inner.next_event_id += 1;
        let now = Utc::now();
        let event = Event {
            id: inner.next_event_id,
            name: new.name,
            description: new.description,
            date: new.date,
            time: new.time,
            location: new.location,
            capacity: new.capacity,
            price: new.price,
            status: new.status,
            category: new.category,
            organizer: new.organizer,
            logo: new.logo,
            created_at: now,
            updated_at: now,
        };
        inner.events.push(event.clone());
        Ok(event)
    }

    async fn update(&self, id: i64, patch: EventPatch) -> StoreResult<Event> {
        let mut inner = self.lock();
        let event = inner
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("event {id}")))?;

        if let Some(name) = patch.name {
            event.name = name;
        }
        if let Some(description) = patch.description {
            event.description = Some(description);
        }
        if let Some(date) = patch.date {
            event.date = date;
        }
        if let Some(time) = patch.time {
            event.time = time;
        }
        if let Some(location) = patch.location {
            event.location = location;
        }
        if let Some(capacity) = patch.capacity {
            event.capacity = capacity;
        }
        if let Some(price) = patch.price {
            event.price = price;
        }
        if let Some(status) = patch.status {
            event.status = status;
        }
        if let Some(category) = patch.category {
            event.category = Some(category);
        }
        if let Some(organizer) = patch.organizer {
            event.organizer = Some(organizer);
        }
        if let Some(logo) = patch.logo {
            event.logo = Some(logo);
        }
        event.updated_at = Utc::now();
        Ok(event.clone())
    }

    async fn set_status_many(&self, ids: &[i64], status: EventStatus) -> StoreResult<Vec<Event>> {
        let mut inner = self.lock();
        let now = Utc::now();
        let mut touched = Vec::new();
        for event in inner.events.iter_mut().filter(|e| ids.contains(&e.id)) {
            event.status = status;
            event.updated_at = now;
            touched.push(event.clone());
        }
        Ok(touched)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.lock();
        let before = inner.events.len();
        inner.events.retain(|e| e.id != id);
        if inner.events.len() == before {
            return Err(StoreError::NotFound(format!("event {id}")));
        }
        inner.tickets.retain(|t| t.event_id != id);
        Ok(())
    }

    async fn delete_many(&self, ids: &[i64]) -> StoreResult<()> {
        let mut inner = self.lock();
        inner.events.retain(|e| !ids.contains(&e.id));
        inner.tickets.retain(|t| !ids.contains(&t.event_id));
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list(&self, filter: UserFilter) -> StoreResult<Vec<User>> {
        let inner = self.lock();
        Ok(inner
            .users
            .iter()
            .filter(|u| filter.role.map_or(true, |r| u.role == r))
            .filter(|u| filter.status.map_or(true, |s| u.status == s))
            .cloned()
            .collect())
    }

    async fn create(&self, new: NewUser) -> StoreResult<User> {
        let mut inner = self.lock();
        if inner.users.iter().any(|u| u.email == new.email) {
            return Err(StoreError::Conflict(format!(
                "email already registered: {}",
                new.email
            )));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
            status: new.status,
            phone: new.phone,
            avatar: new.avatar,
            permissions: new.permissions,
            last_access: None,
            created_at: now,
            updated_at: now,
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> StoreResult<User> {
        let mut inner = self.lock();
        if let Some(email) = &patch.email {
            if inner.users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::Conflict(format!(
                    "email already registered: {email}"
                )));
            }
        }
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("user {id}")))?;

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(status) = patch.status {
            user.status = status;
        }
        if let Some(phone) = patch.phone {
            user.phone = Some(phone);
        }
        if let Some(avatar) = patch.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(permissions) = patch.permissions {
            user.permissions = permissions;
        }
        if let Some(last_access) = patch.last_access {
            user.last_access = Some(last_access);
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_status_many(&self, ids: &[Uuid], status: UserStatus) -> StoreResult<Vec<User>> {
        let mut inner = self.lock();
        let now = Utc::now();
        let mut touched = Vec::new();
        for user in inner.users.iter_mut().filter(|u| ids.contains(&u.id)) {
            user.status = status;
            user.updated_at = now;
            touched.push(user.clone());
        }
        Ok(touched)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut inner = self.lock();
        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        if inner.users.len() == before {
            return Err(StoreError::NotFound(format!("user {id}")));
        }
        // Designs survive their owner; only the back-reference clears.
        for design in inner.designs.iter_mut().filter(|d| d.user_id == Some(id)) {
            design.user_id = None;
        }
        Ok(())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> StoreResult<()> {
        let mut inner = self.lock();
        inner.users.retain(|u| !ids.contains(&u.id));
        for design in inner.designs.iter_mut() {
            if design.user_id.map_or(false, |owner| ids.contains(&owner)) {
                design.user_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TicketDesignStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<TicketDesign>> {
        Ok(self.lock().designs.clone())
    }

    async fn create(&self, new: NewTicketDesign) -> StoreResult<TicketDesign> {
        let mut inner = self.lock();
        let now = Utc::now();
        let design = TicketDesign {
            id: Uuid::new_v4(),
            name: new.name,
            template_id: new.template_id,
            event_name: new.event_name,
            date: new.date,
            time: new.time,
            location: new.location,
            ticket_number: new.ticket_number,
            ticket_type: new.ticket_type,
            price: new.price,
            qr_code: new.qr_code,
            category: new.category,
            organizer: new.organizer,
            logo: new.logo,
            primary_color: new.primary_color,
            secondary_color: new.secondary_color,
            background_color: new.background_color,
            text_color: new.text_color,
            font_family: new.font_family,
            font_size: new.font_size,
            border_radius: new.border_radius,
            orientation: new.orientation,
            format: new.format,
            user_id: new.user_id,
            created_at: now,
            updated_at: now,
        };
        inner.designs.push(design.clone());
        Ok(design)
    }
}

#[async_trait]
impl TicketStore for MemoryStore {
    async fn list_for_event(&self, event_id: i64) -> StoreResult<Vec<Ticket>> {
        let inner = self.lock();
        Ok(inner
            .tickets
            .iter()
            .filter(|t| t.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn create(&self, new: NewTicket) -> StoreResult<Ticket> {
        let mut inner = self.lock();
        if !inner.events.iter().any(|e| e.id == new.event_id) {
            return Err(StoreError::NotFound(format!("event {}", new.event_id)));
        }
        if inner.tickets.iter().any(|t| t.qr_code == new.qr_code) {
            return Err(StoreError::Conflict(format!(
                "qr code already issued: {}",
                new.qr_code
            )));
        }
        let now = Utc::now();
        let ticket = Ticket {
            id: Uuid::new_v4(),
            event_id: new.event_id,
            holder_name: new.holder_name,
            holder_email: new.holder_email,
            ticket_type: new.ticket_type,
            price: new.price,
            status: new.status,
            purchase_date: now,
            qr_code: new.qr_code,
            is_scanned: false,
            scanned_time: None,
            gate_used: None,
            ticket_design_id: new.ticket_design_id,
            created_at: now,
            updated_at: now,
        };
        inner.tickets.push(ticket.clone());
        Ok(ticket)
    }

    async fn sold_counts(&self) -> StoreResult<HashMap<i64, i64>> {
        let inner = self.lock();
        let mut counts = HashMap::new();
        for ticket in inner.tickets.iter().filter(|t| t.status == TicketStatus::Sold) {
            *counts.entry(ticket.event_id).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use rust_decimal::Decimal;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ana Gomez".to_string(),
            email: email.to_string(),
            password_hash: "$argon2$…".to_string(),
            role: UserRole::Operator,
            status: UserStatus::Active,
            phone: None,
            avatar: None,
            permissions: vec!["events:read".to_string()],
        }
    }

    fn new_event(name: &str) -> NewEvent {
        NewEvent {
            name: name.to_string(),
            description: None,
            date: "2024-09-12".parse().unwrap(),
            time: "19:30:00".parse().unwrap(),
            location: "Centro de Convenciones".to_string(),
            capacity: 300,
            price: Decimal::new(4500, 2),
            status: EventStatus::Selling,
            category: None,
            organizer: None,
            logo: None,
        }
    }

    fn new_ticket(event_id: i64, qr: &str, status: TicketStatus) -> NewTicket {
        NewTicket {
            event_id,
            holder_name: "Luis Perez".to_string(),
            holder_email: "luis@example.com".to_string(),
            ticket_type: "general".to_string(),
            price: Decimal::new(4500, 2),
            status,
            qr_code: qr.to_string(),
            ticket_design_id: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        UserStore::create(&store, new_user("ana@example.com"))
            .await
            .unwrap();

        let err = UserStore::create(&store, new_user("ana@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn duplicate_qr_code_is_a_conflict() {
        let store = MemoryStore::new();
        let event = EventStore::create(&store, new_event("Expo")).await.unwrap();
        TicketStore::create(&store, new_ticket(event.id, "QR-1", TicketStatus::Sold))
            .await
            .unwrap();

        let err = TicketStore::create(&store, new_ticket(event.id, "QR-1", TicketStatus::Sold))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn deleting_an_event_takes_its_tickets_along() {
        let store = MemoryStore::new();
        let event = EventStore::create(&store, new_event("Expo")).await.unwrap();
        let other = EventStore::create(&store, new_event("Feria")).await.unwrap();
        TicketStore::create(&store, new_ticket(event.id, "QR-1", TicketStatus::Sold))
            .await
            .unwrap();
        TicketStore::create(&store, new_ticket(other.id, "QR-2", TicketStatus::Sold))
            .await
            .unwrap();

        EventStore::delete(&store, event.id).await.unwrap();

        assert!(TicketStore::list_for_event(&store, event.id)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            TicketStore::list_for_event(&store, other.id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn deleting_a_user_keeps_their_designs() {
        let store = MemoryStore::new();
        let user = UserStore::create(&store, new_user("ana@example.com"))
            .await
            .unwrap();

        let mut payload = crate::design::DesignState::default().to_payload(Some(user.id));
        payload.event_name = "Expo".to_string();
        let design = TicketDesignStore::create(&store, payload).await.unwrap();
        assert_eq!(design.user_id, Some(user.id));

        UserStore::delete(&store, user.id).await.unwrap();

        let designs = TicketDesignStore::list(&store).await.unwrap();
        assert_eq!(designs.len(), 1);
        assert_eq!(designs[0].user_id, None);
    }

    #[tokio::test]
    async fn sold_counts_only_count_sold_tickets() {
        let store = MemoryStore::new();
        let event = EventStore::create(&store, new_event("Expo")).await.unwrap();
        TicketStore::create(&store, new_ticket(event.id, "QR-1", TicketStatus::Sold))
            .await
            .unwrap();
        TicketStore::create(&store, new_ticket(event.id, "QR-2", TicketStatus::Reserved))
            .await
            .unwrap();
        TicketStore::create(&store, new_ticket(event.id, "QR-3", TicketStatus::Sold))
            .await
            .unwrap();

        let counts = TicketStore::sold_counts(&store).await.unwrap();
        assert_eq!(counts.get(&event.id), Some(&2));
    }
}
