pub mod event;
pub mod ticket;
pub mod ticket_design;
pub mod user;

pub use event::{Event, EventFilter, EventPatch, EventStatus, NewEvent};
pub use ticket::{NewTicket, Ticket, TicketStatus};
pub use ticket_design::{NewTicketDesign, Orientation, TicketDesign, TicketFormat};
pub use user::{NewUser, User, UserFilter, UserPatch, UserRole, UserStatus};
