pub mod model;
pub mod session;

pub use model::{DesignContent, DesignState, DesignStyle, FieldEdit, PLACEHOLDER_LOGO};
pub use session::{DesignSession, SessionError, SessionPhase};
