pub mod events;
pub mod users;

use thiserror::Error;

use crate::store::StoreError;

pub use events::EventsScreen;
pub use users::UsersScreen;

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("operation requires administrator rights")]
    Forbidden,

    /// Bulk deletion is irreversible and must be confirmed explicitly.
    #[error("bulk delete requires explicit confirmation")]
    ConfirmationRequired,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Case-insensitive substring match used by the screen search boxes.
pub(crate) fn matches(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
