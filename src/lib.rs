// CRM calendar library
// Aggregates tasks, follow-ups, notes and events into one timeline and lays it
// out as day, week and month views

pub mod calendar;
pub mod config;
pub mod error;
pub mod feed;
pub mod http_config;
pub mod models;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::*;
pub use calendar::{Granularity, NavigationController, NavigationIntent};
pub use error::{AppError, AppResult};
pub use feed::{CalendarFeed, FeedState, RefreshOutcome};
pub use sources::{InMemoryStore, RecordSource, RestSource, Scope, SourceSnapshot};
