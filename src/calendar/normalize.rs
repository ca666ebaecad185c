//! Maps the four source record kinds onto [`CalendarEvent`].

use super::dates::parse_timestamp;
use crate::models::{
    CalendarEvent, Directory, Event, EventDetails, FollowUp, Note, Task,
};
use crate::sources::SourceSnapshot;
use crate::utils::logging::log_aggregation;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::warn;

pub const NOTE_PREVIEW_CHARS: usize = 30;
pub const FOLLOW_UP_PREFIX: &str = "Follow-up: ";

/// Normalizes a fetched snapshot, resolving client and user names against the
/// snapshot's own reference lists.
pub fn normalize_snapshot(snapshot: &SourceSnapshot, tz: Tz) -> Vec<CalendarEvent> {
    let directory = Directory::new(&snapshot.clients, &snapshot.users);
    normalize(
        &snapshot.tasks,
        &snapshot.followups,
        &snapshot.notes,
        &snapshot.events,
        &directory,
        tz,
    )
}

/// Builds one timeline from the four collections, sorted ascending by
/// timestamp. The sort is stable and the input is concatenated as tasks,
/// follow-ups, notes, events, so equal timestamps keep that order.
///
/// Records whose date is missing or unparseable are skipped with a warning.
pub fn normalize(
    tasks: &[Task],
    followups: &[FollowUp],
    notes: &[Note],
    events: &[Event],
    directory: &Directory,
    tz: Tz,
) -> Vec<CalendarEvent> {
    let total = tasks.len() + followups.len() + notes.len() + events.len();
    let mut out = Vec::with_capacity(total);

    out.extend(tasks.iter().filter_map(|t| from_task(t, directory, tz)));
    out.extend(followups.iter().filter_map(|f| from_followup(f, directory, tz)));
    out.extend(notes.iter().filter_map(|n| from_note(n, directory, tz)));
    out.extend(events.iter().filter_map(|e| from_event(e, directory, tz)));

    out.sort_by_key(|event| event.timestamp);

    log_aggregation(out.len(), total - out.len());
    out
}

fn timestamp_of(kind: &str, id: i64, raw: Option<&str>, tz: Tz) -> Option<DateTime<Utc>> {
    let Some(raw) = raw else {
        warn!("Skipping {} {}: no date", kind, id);
        return None;
    };
    match parse_timestamp(raw, tz) {
        Ok(ts) => Some(ts),
        Err(e) => {
            warn!("Skipping {} {}: {}", kind, id, e);
            None
        }
    }
}

fn from_task(task: &Task, directory: &Directory, tz: Tz) -> Option<CalendarEvent> {
    let timestamp = timestamp_of("task", task.id, task.fecha_limite.as_deref(), tz)?;
    Some(CalendarEvent {
        title: task.titulo.clone(),
        timestamp,
        client: task.cliente_id.map(|id| directory.client(id)),
        user: task.usuario_id.map(|id| directory.user(id)),
        description: task.descripcion.clone(),
        details: EventDetails::Task {
            source_id: task.id,
            status: task.estado,
        },
    })
}

fn from_followup(followup: &FollowUp, directory: &Directory, tz: Tz) -> Option<CalendarEvent> {
    let timestamp = timestamp_of("follow-up", followup.id, followup.fecha.as_deref(), tz)?;
    Some(CalendarEvent {
        title: format!("{}{}", FOLLOW_UP_PREFIX, followup.tipo),
        timestamp,
        client: followup.cliente_id.map(|id| directory.client(id)),
        user: followup.usuario_id.map(|id| directory.user(id)),
        description: followup.notas.clone(),
        details: EventDetails::FollowUp {
            source_id: followup.id,
            channel: followup.tipo.clone(),
        },
    })
}

fn from_note(note: &Note, directory: &Directory, tz: Tz) -> Option<CalendarEvent> {
    let timestamp = timestamp_of("note", note.id, note.fecha.as_deref(), tz)?;
    Some(CalendarEvent {
        title: preview(&note.contenido),
        timestamp,
        client: note.cliente_id.map(|id| directory.client(id)),
        user: note.usuario_id.map(|id| directory.user(id)),
        description: Some(note.contenido.clone()),
        details: EventDetails::Note {
            source_id: note.id,
            content: note.contenido.clone(),
        },
    })
}

fn from_event(event: &Event, directory: &Directory, tz: Tz) -> Option<CalendarEvent> {
    let timestamp = timestamp_of("event", event.id, event.fecha.as_deref(), tz)?;
    Some(CalendarEvent {
        title: event.titulo.clone(),
        timestamp,
        client: event.cliente_id.map(|id| directory.client(id)),
        user: None,
        description: event.descripcion.clone(),
        details: EventDetails::Event { source_id: event.id },
    })
}

/// First [`NOTE_PREVIEW_CHARS`] characters, with an ellipsis when cut.
pub fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(NOTE_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}
