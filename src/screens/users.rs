use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::context::AuthContext;
use crate::models::{NewUser, User, UserFilter, UserPatch, UserStatus};
use crate::screens::{matches, ScreenError};
use crate::store::UserStore;

/// The users table: same shape as the events screen, with the active/inactive
/// toggle as the row-level status action.
pub struct UsersScreen {
    users: Arc<dyn UserStore>,
    auth: AuthContext,
    rows: Vec<User>,
    selected: BTreeSet<Uuid>,
    search: String,
}

impl UsersScreen {
    pub fn new(users: Arc<dyn UserStore>, auth: AuthContext) -> Self {
        Self {
            users,
            auth,
            rows: Vec::new(),
            selected: BTreeSet::new(),
            search: String::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), ScreenError> {
        self.rows = self.users.list(UserFilter::default()).await?;
        Ok(())
    }

    pub fn rows(&self) -> &[User] {
        &self.rows
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Rows matching the search term, OR'd across name and email.
    pub fn visible(&self) -> Vec<&User> {
        if self.search.is_empty() {
            return self.rows.iter().collect();
        }
        let needle = self.search.to_lowercase();
        self.rows
            .iter()
            .filter(|u| matches(&u.name, &needle) || matches(&u.email, &needle))
            .collect()
    }

    pub fn toggle_select(&mut self, id: Uuid) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn selection(&self) -> Vec<Uuid> {
        self.selected.iter().copied().collect()
    }

    pub async fn create(&mut self, new: NewUser) -> Result<User, ScreenError> {
        let created = self.users.create(new).await?;
        self.rows.push(created.clone());
        Ok(created)
    }

    pub async fn update(&mut self, id: Uuid, patch: UserPatch) -> Result<User, ScreenError> {
        let updated = self.users.update(id, patch).await?;
        if let Some(row) = self.rows.iter_mut().find(|u| u.id == id) {
            *row = updated.clone();
        }
        Ok(updated)
    }

    /// Flips a row between active and inactive, from the store's answer.
    pub async fn toggle_status(&mut self, id: Uuid) -> Result<User, ScreenError> {
        let current = self
            .rows
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| ScreenError::Store(crate::store::StoreError::NotFound(format!("user {id}"))))?;

        let patch = UserPatch {
            status: Some(current.status.toggled()),
            ..UserPatch::default()
        };
        self.update(id, patch).await
    }

    /// One batched call for the whole selection, cleared on completion.
    pub async fn set_status_selected(&mut self, status: UserStatus) -> Result<usize, ScreenError> {
        let ids = self.selection();
        if ids.is_empty() {
            return Ok(0);
        }
        let touched = self.users.set_status_many(&ids, status).await?;
        for user in &touched {
            if let Some(row) = self.rows.iter_mut().find(|u| u.id == user.id) {
                *row = user.clone();
            }
        }
        self.selected.clear();
        info!(count = touched.len(), ?status, "bulk user status change");
        Ok(touched.len())
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<(), ScreenError> {
        if !self.auth.is_admin() {
            return Err(ScreenError::Forbidden);
        }
        self.users.delete(id).await?;
        self.rows.retain(|u| u.id != id);
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
        self.users.delete_many(&ids).await?;
        self.rows.retain(|u| !ids.contains(&u.id));
        self.selected.clear();
        info!(count = ids.len(), "bulk user delete");
        Ok(ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use crate::store::memory::MemoryStore;

    fn admin() -> AuthContext {
        AuthContext::new(Uuid::new_v4(), UserRole::Administrator)
    }

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "$argon2$…".to_string(),
            role: UserRole::Operator,
            status: UserStatus::Active,
            phone: None,
            avatar: None,
            permissions: Vec::new(),
        }
    }

    async fn seeded_screen() -> UsersScreen {
        let store = Arc::new(MemoryStore::new());
        let mut screen = UsersScreen::new(store, admin());
        screen
            .create(new_user("Ana Gomez", "ana@example.com"))
            .await
            .unwrap();
        screen
            .create(new_user("Luis Perez", "luis.perez@example.com"))
            .await
            .unwrap();
        screen
    }

    #[tokio::test]
    async fn search_matches_name_or_email() {
        let mut screen = seeded_screen().await;

        screen.set_search("ANA");
        let visible = screen.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].email, "ana@example.com");

        screen.set_search("perez@");
        assert_eq!(screen.visible().len(), 1);

        screen.set_search("");
        assert_eq!(screen.visible().len(), 2);
    }

    #[tokio::test]
    async fn toggle_flips_active_and_back() {
        let mut screen = seeded_screen().await;
        let id = screen.rows()[0].id;

        let toggled = screen.toggle_status(id).await.unwrap();
        assert_eq!(toggled.status, UserStatus::Inactive);

        let toggled = screen.toggle_status(id).await.unwrap();
        assert_eq!(toggled.status, UserStatus::Active);
    }

    #[tokio::test]
    async fn bulk_status_change_blocks_the_selection_and_clears_it() {
        let mut screen = seeded_screen().await;
        let ids: Vec<Uuid> = screen.rows().iter().map(|u| u.id).collect();
        for id in &ids {
            screen.toggle_select(*id);
        }

        let touched = screen
            .set_status_selected(UserStatus::Blocked)
            .await
            .unwrap();

        assert_eq!(touched, ids.len());
        assert!(screen.selection().is_empty());
        assert!(screen
            .rows()
            .iter()
            .all(|u| u.status == UserStatus::Blocked));
    }

    #[tokio::test]
    async fn non_admins_cannot_delete() {
        let store = Arc::new(MemoryStore::new());
        let mut screen = UsersScreen::new(store.clone(), admin());
        let user = screen
            .create(new_user("Ana Gomez", "ana@example.com"))
            .await
            .unwrap();

        let mut readonly =
            UsersScreen::new(store, AuthContext::new(Uuid::new_v4(), UserRole::ReadOnly));
        readonly.refresh().await.unwrap();

        assert!(matches!(
            readonly.delete(user.id).await.unwrap_err(),
            ScreenError::Forbidden
        ));
    }

    #[tokio::test]
    async fn bulk_delete_confirms_then_deletes() {
        let mut screen = seeded_screen().await;
        let ids: Vec<Uuid> = screen.rows().iter().map(|u| u.id).collect();
        for id in &ids {
            screen.toggle_select(*id);
        }

        assert!(matches!(
            screen.delete_selected(false).await.unwrap_err(),
            ScreenError::ConfirmationRequired
        ));
        assert_eq!(screen.delete_selected(true).await.unwrap(), 2);
        assert!(screen.rows().is_empty());

        screen.refresh().await.unwrap();
        assert!(screen.rows().is_empty());
    }
}
