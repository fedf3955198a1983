use std::sync::Arc;

use sqlx::PgPool;

use crate::context::SystemConfig;
use crate::store::memory::MemoryStore;
use crate::store::pg::{PgEventStore, PgTicketDesignStore, PgTicketStore, PgUserStore};
use crate::store::{EventStore, TicketDesignStore, TicketStore, UserStore};

/// Store handles plus system configuration, built once at startup and handed
/// to the router and to session/screen constructors. The only wiring point in
/// the crate; nothing reads stores from a global.
#[derive(Clone)]
pub struct AppRegistry {
    events: Arc<dyn EventStore>,
    users: Arc<dyn UserStore>,
    designs: Arc<dyn TicketDesignStore>,
    tickets: Arc<dyn TicketStore>,
    system: SystemConfig,
}

impl AppRegistry {
    pub fn postgres(pool: PgPool, system: SystemConfig) -> Self {
        Self {
            events: Arc::new(PgEventStore::new(pool.clone())),
            users: Arc::new(PgUserStore::new(pool.clone())),
            designs: Arc::new(PgTicketDesignStore::new(pool.clone())),
            tickets: Arc::new(PgTicketStore::new(pool)),
            system,
        }
    }

    /// Everything backed by one shared in-memory store; used by tests and
    /// local embedding without a database.
    pub fn in_memory(system: SystemConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            events: store.clone(),
            users: store.clone(),
            designs: store.clone(),
            tickets: store,
            system,
        }
    }

    pub fn events(&self) -> Arc<dyn EventStore> {
        self.events.clone()
    }

    pub fn users(&self) -> Arc<dyn UserStore> {
        self.users.clone()
    }

    pub fn designs(&self) -> Arc<dyn TicketDesignStore> {
        self.designs.clone()
    }

    pub fn tickets(&self) -> Arc<dyn TicketStore> {
        self.tickets.clone()
    }

    pub fn system(&self) -> &SystemConfig {
        &self.system
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AuthContext;
    use crate::design::{DesignSession, FieldEdit};
    use crate::models::UserRole;
    use crate::screens::EventsScreen;
    use uuid::Uuid;

    #[tokio::test]
    async fn registry_wires_sessions_and_screens_over_one_store() {
        let registry = AppRegistry::in_memory(SystemConfig::default());
        let auth = AuthContext::new(Uuid::new_v4(), UserRole::Administrator);

        let mut session =
            DesignSession::new(registry.designs(), auth, registry.system().clone());
        session.edit(FieldEdit::EventName("Expo".to_string()));
        session.save().await.unwrap();

        let mut second =
            DesignSession::new(registry.designs(), auth, registry.system().clone());
        assert_eq!(second.load_all().await.unwrap(), 1);

        let mut screen = EventsScreen::new(registry.events(), registry.tickets(), auth);
        screen.refresh().await.unwrap();
        assert!(screen.rows().is_empty());
    }
}
