use super::reference::EntityRef;
use super::task::TaskStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Task,
    FollowUp,
    Note,
    Event,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Task => "task",
            EventKind::FollowUp => "followup",
            EventKind::Note => "note",
            EventKind::Event => "event",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite identity of a calendar entry. Renders as `{kind}-{source_id}`,
/// so source ids that overlap across kinds never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventKey {
    pub kind: EventKind,
    pub source_id: i64,
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.source_id)
    }
}

/// Kind-specific payload. The variant is the kind tag; fields that only make
/// sense for one kind live only on that variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EventDetails {
    Task { source_id: i64, status: TaskStatus },
    #[serde(rename = "followup")]
    FollowUp { source_id: i64, channel: String },
    Note { source_id: i64, content: String },
    Event { source_id: i64 },
}

impl EventDetails {
    pub fn kind(&self) -> EventKind {
        match self {
            EventDetails::Task { .. } => EventKind::Task,
            EventDetails::FollowUp { .. } => EventKind::FollowUp,
            EventDetails::Note { .. } => EventKind::Note,
            EventDetails::Event { .. } => EventKind::Event,
        }
    }

    pub fn source_id(&self) -> i64 {
        match self {
            EventDetails::Task { source_id, .. }
            | EventDetails::FollowUp { source_id, .. }
            | EventDetails::Note { source_id, .. }
            | EventDetails::Event { source_id } => *source_id,
        }
    }
}

/// Unified timeline entry derived from one source record. Built fresh on every
/// aggregation and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub client: Option<EntityRef>,
    pub user: Option<EntityRef>,
    pub description: Option<String>,
    pub details: EventDetails,
}

impl CalendarEvent {
    pub fn key(&self) -> EventKey {
        EventKey {
            kind: self.details.kind(),
            source_id: self.details.source_id(),
        }
    }

    /// The `{kind}-{source_id}` identifier.
    pub fn id(&self) -> String {
        self.key().to_string()
    }

    pub fn kind(&self) -> EventKind {
        self.details.kind()
    }

    /// Only tasks carry a status.
    pub fn status(&self) -> Option<TaskStatus> {
        match &self.details {
            EventDetails::Task { status, .. } => Some(*status),
            _ => None,
        }
    }
}
