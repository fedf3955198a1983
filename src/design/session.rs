use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::context::{AuthContext, SystemConfig};
use crate::design::model::{DesignState, FieldEdit};
use crate::models::TicketDesign;
use crate::store::{StoreError, TicketDesignStore};

#[derive(Debug, Error)]
pub enum SessionError {
    /// The design store could not be reached or refused the call. Prior
    /// session state is preserved for saves; the known-designs list is
    /// emptied for loads. Never retried automatically.
    #[error("could not reach the ticket design store")]
    Fetch(#[source] StoreError),

    /// The requested design is not in the already-fetched list.
    #[error("design {0} is not in the loaded list")]
    NotFound(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Editing,
    Saving,
}

/// One editing session over a ticket design: local state between load and
/// save, plus the list of previously saved designs available as templates.
/// `&mut self` on every operation is what makes save/load strictly
/// sequential within a session.
pub struct DesignSession {
    designs: Arc<dyn TicketDesignStore>,
    auth: AuthContext,
    system: SystemConfig,
    state: DesignState,
    saved: Vec<TicketDesign>,
    phase: SessionPhase,
}

impl DesignSession {
    /// Starts from the fixed placeholder design.
    pub fn new(designs: Arc<dyn TicketDesignStore>, auth: AuthContext, system: SystemConfig) -> Self {
        Self {
            designs,
            auth,
            system,
            state: DesignState::default(),
            saved: Vec::new(),
            phase: SessionPhase::Editing,
        }
    }

    pub fn state(&self) -> &DesignState {
        &self.state
    }

    /// Designs fetched by the last successful `load_all`, oldest first.
    pub fn saved(&self) -> &[TicketDesign] {
        &self.saved
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn edit(&mut self, edit: FieldEdit) {
        self.state.apply(edit);
    }

    /// Fetches every persisted design visible to this session (no ownership
    /// filter). On failure the list becomes empty and the error is surfaced.
    pub async fn load_all(&mut self) -> Result<usize, SessionError> {
        match self.designs.list().await {
            Ok(designs) => {
                self.saved = designs;
                Ok(self.saved.len())
            }
            Err(err) => {
                warn!(error = %err, "failed to load saved ticket designs");
                self.saved.clear();
                Err(SessionError::Fetch(err))
            }
        }
    }

    /// Sends the full current design as a create and reconciles local state
    /// from the record the store hands back; the store's version is
    /// canonical because it assigns id and timestamps and may normalize
    /// fields. On failure local state is left exactly as it was.
    pub async fn save(&mut self) -> Result<TicketDesign, SessionError> {
        let payload = self.state.to_payload(self.auth.user_id);

        self.phase = SessionPhase::Saving;
        let result = self.designs.create(payload).await;
        self.phase = SessionPhase::Editing;

        match result {
            Ok(created) => {
                info!(design_id = %created.id, name = %created.name, "ticket design saved");
                self.state = DesignState::from_saved(&created, &self.system.placeholder_logo);
                self.saved.push(created.clone());
                Ok(created)
            }
            Err(err) => {
                warn!(error = %err, "ticket design save failed");
                Err(SessionError::Fetch(err))
            }
        }
    }

    /// Reuses an already-fetched design as the session's template. No network
    /// round trip: the lookup is over the list `load_all` produced. Session
    /// state only changes when the id is found.
    pub fn load_selected(&mut self, id: Uuid) -> Result<(), SessionError> {
        let design = self
            .saved
            .iter()
            .find(|d| d.id == id)
            .ok_or(SessionError::NotFound(id))?;

        self.state = DesignState::from_saved(design, &self.system.placeholder_logo);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::store::StoreResult;
    use async_trait::async_trait;

    struct UnreachableStore;

    #[async_trait]
    impl TicketDesignStore for UnreachableStore {
        async fn list(&self) -> StoreResult<Vec<TicketDesign>> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn create(
            &self,
            _new: crate::models::NewTicketDesign,
        ) -> StoreResult<TicketDesign> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn session_over(store: Arc<dyn TicketDesignStore>) -> DesignSession {
        DesignSession::new(store, AuthContext::anonymous(), SystemConfig::default())
    }

    #[tokio::test]
    async fn save_reconciles_state_from_the_canonical_record() {
        let mut session = session_over(Arc::new(MemoryStore::new()));
        session.edit(FieldEdit::EventName("Tech Conf".to_string()));
        session.edit(FieldEdit::Template("modern".to_string()));

        let created = session.save().await.unwrap();

        assert_eq!(created.name, "Tech Conf - modern Design");
        assert_eq!(session.state().content.event_name, created.event_name);
        assert_eq!(session.state().template_id, created.template_id);
        assert_eq!(session.saved().len(), 1);
        assert_eq!(session.phase(), SessionPhase::Editing);
    }

    #[tokio::test]
    async fn saved_design_round_trips_through_load_selected() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session_over(store.clone());
        session.edit(FieldEdit::EventName("Tech Conf".to_string()));
        session.edit(FieldEdit::FontSize(20));
        let created = session.save().await.unwrap();

        // Wander off to a different design, then come back.
        let mut other = session_over(store);
        other.load_all().await.unwrap();
        other.load_selected(created.id).unwrap();

        assert_eq!(
            other.state(),
            &DesignState::from_saved(&created, crate::design::PLACEHOLDER_LOGO)
        );
    }

    #[tokio::test]
    async fn load_selected_with_unknown_id_leaves_state_alone() {
        let mut session = session_over(Arc::new(MemoryStore::new()));
        session.edit(FieldEdit::EventName("Untouched".to_string()));
        let before = session.state().clone();

        let missing = Uuid::new_v4();
        let err = session.load_selected(missing).unwrap_err();

        assert!(matches!(err, SessionError::NotFound(id) if id == missing));
        assert_eq!(session.state(), &before);
    }

    #[tokio::test]
    async fn failed_load_all_empties_the_design_list() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session_over(store);
        session.save().await.unwrap();
        assert_eq!(session.saved().len(), 1);

        // Swap in a store that refuses the call.
        let mut session = DesignSession {
            designs: Arc::new(UnreachableStore),
            ..session
        };

        let err = session.load_all().await.unwrap_err();
        assert!(matches!(err, SessionError::Fetch(_)));
        assert!(session.saved().is_empty());
    }

    #[tokio::test]
    async fn failed_save_leaves_state_unchanged() {
        let mut session = session_over(Arc::new(UnreachableStore));
        session.edit(FieldEdit::EventName("Tech Conf".to_string()));
        let before = session.state().clone();

        let err = session.save().await.unwrap_err();

        assert!(matches!(err, SessionError::Fetch(_)));
        assert_eq!(session.state(), &before);
        assert!(session.saved().is_empty());
        assert_eq!(session.phase(), SessionPhase::Editing);
    }
}
