//! Holds the latest aggregated timeline and guards it against stale fetches.
//!
//! Every refresh takes a ticket from a generation counter. When its fetch
//! resolves, the result is applied only if no later ticket has been applied
//! already, so a slow response cannot overwrite a fresher one.

use crate::calendar::normalize_snapshot;
use crate::models::CalendarEvent;
use crate::sources::{fetch_snapshot, RecordSource, Scope};
use crate::utils::logging::log_fetch_failure;
use chrono_tz::Tz;
use log::{debug, info};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    pub events: Vec<CalendarEvent>,
    /// Set when the last applied refresh failed; `events` is empty then.
    pub error: Option<String>,
    /// Ticket of the refresh that produced this state (0 before the first).
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied { events: usize },
    Superseded,
    Failed(String),
}

pub struct CalendarFeed<S> {
    source: S,
    tz: Tz,
    issued: AtomicU64,
    state: RwLock<FeedState>,
}

impl<S: RecordSource> CalendarFeed<S> {
    pub fn new(source: S, tz: Tz) -> Self {
        Self {
            source,
            tz,
            issued: AtomicU64::new(0),
            state: RwLock::new(FeedState::default()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Fetches `scope`, normalizes it and applies it unless superseded. Fetch
    /// failures leave an empty timeline with an error indicator; nothing here
    /// retries.
    pub async fn refresh(&self, scope: Scope) -> RefreshOutcome {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Refresh #{} started for {:?}", ticket, scope);

        let result = fetch_snapshot(&self.source, scope)
            .await
            .map(|snapshot| normalize_snapshot(&snapshot, self.tz));

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if ticket < state.generation {
            info!("Discarding refresh #{}; #{} is already applied", ticket, state.generation);
            return RefreshOutcome::Superseded;
        }

        state.generation = ticket;
        match result {
            Ok(events) => {
                let count = events.len();
                state.events = events;
                state.error = None;
                RefreshOutcome::Applied { events: count }
            }
            Err(e) => {
                log_fetch_failure("Calendar refresh", &e);
                let message = e.to_safe_string();
                state.events.clear();
                state.error = Some(message.clone());
                RefreshOutcome::Failed(message)
            }
        }
    }

    pub fn state(&self) -> FeedState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn events(&self) -> Vec<CalendarEvent> {
        self.state().events
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).error.clone()
    }

    /// Runs `f` against the current timeline without copying it.
    pub fn with_events<R>(&self, f: impl FnOnce(&[CalendarEvent]) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state.events)
    }
}
