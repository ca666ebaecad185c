// Source record shapes as served by the CRM backend, plus the unified
// calendar entity derived from them.

pub mod calendar_event;
pub mod event;
pub mod followup;
pub mod note;
pub mod reference;
pub mod task;

pub use calendar_event::{CalendarEvent, EventDetails, EventKey, EventKind};
pub use event::Event;
pub use followup::FollowUp;
pub use note::Note;
pub use reference::{Client, Directory, EntityRef, User};
pub use task::{Task, TaskStatus};
