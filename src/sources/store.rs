//! Owned in-memory repository.
//!
//! Each [`Table`] hands out immutable snapshots; writes build a new snapshot
//! instead of mutating one a reader may still hold.

use super::{RecordSource, SourceSnapshot};
use crate::error::{AppError, AppResult};
use crate::models::{Client, Event, FollowUp, Note, Task, User};
use async_trait::async_trait;
use log::{debug, info};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

pub trait Record: Clone + Send + Sync {
    const KIND: &'static str;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn client_id(&self) -> Option<i64>;
}

macro_rules! record {
    ($ty:ty, $kind:literal, |$r:ident| $client:expr) => {
        impl Record for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> i64 {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = id;
            }

            fn client_id(&self) -> Option<i64> {
                let $r = self;
                $client
            }
        }
    };
}

record!(Task, "task", |r| r.cliente_id);
record!(FollowUp, "follow-up", |r| r.cliente_id);
record!(Note, "note", |r| r.cliente_id);
record!(Event, "event", |r| r.cliente_id);
record!(Client, "client", |r| Some(r.id));
record!(User, "user", |_r| None);

struct TableState<T> {
    rows: Arc<[T]>,
    next_id: i64,
}

pub struct Table<T> {
    state: RwLock<TableState<T>>,
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self::from_rows(Vec::new())
    }
}

impl<T: Record> Table<T> {
    /// Seeds the table; new ids continue after the highest existing one.
    pub fn from_rows(rows: Vec<T>) -> Self {
        let next_id = rows.iter().map(Record::id).max().unwrap_or(0) + 1;
        Self {
            state: RwLock::new(TableState {
                rows: rows.into(),
                next_id,
            }),
        }
    }

    pub fn list(&self) -> Arc<[T]> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).rows.clone()
    }

    pub fn list_by_client(&self, client_id: i64) -> Vec<T> {
        self.list()
            .iter()
            .filter(|r| r.client_id() == Some(client_id))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.list().iter().find(|r| r.id() == id).cloned()
    }

    /// Stores `record` under a fresh id and returns the stored copy.
    pub fn insert(&self, mut record: T) -> T {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        record.set_id(state.next_id);
        state.next_id += 1;

        let mut rows = state.rows.to_vec();
        rows.push(record.clone());
        state.rows = rows.into();

        debug!("Inserted {} {}", T::KIND, record.id());
        record
    }

    /// Replaces the row with the same id.
    pub fn update(&self, record: T) -> AppResult<T> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let position = state
            .rows
            .iter()
            .position(|r| r.id() == record.id())
            .ok_or_else(|| AppError::not_found(format!("{} {}", T::KIND, record.id())))?;

        let mut rows = state.rows.to_vec();
        rows[position] = record.clone();
        state.rows = rows.into();
        Ok(record)
    }

    /// Removes and returns the row with `id`.
    pub fn delete(&self, id: i64) -> AppResult<T> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let mut rows = state.rows.to_vec();
        let position = rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| AppError::not_found(format!("{} {}", T::KIND, id)))?;

        let removed = rows.remove(position);
        state.rows = rows.into();
        debug!("Deleted {} {}", T::KIND, id);
        Ok(removed)
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    pub tasks: Table<Task>,
    pub followups: Table<FollowUp>,
    pub notes: Table<Note>,
    pub events: Table<Event>,
    pub clients: Table<Client>,
    pub users: Table<User>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: SourceSnapshot) -> Self {
        Self {
            tasks: Table::from_rows(snapshot.tasks),
            followups: Table::from_rows(snapshot.followups),
            notes: Table::from_rows(snapshot.notes),
            events: Table::from_rows(snapshot.events),
            clients: Table::from_rows(snapshot.clients),
            users: Table::from_rows(snapshot.users),
        }
    }

    /// Loads a fixture shaped like [`SourceSnapshot`]; missing collections are empty.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let snapshot: SourceSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_fixture_file(path: &Path) -> AppResult<Self> {
        info!("Loading fixtures from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn snapshot(&self) -> SourceSnapshot {
        SourceSnapshot {
            tasks: self.tasks.list().to_vec(),
            followups: self.followups.list().to_vec(),
            notes: self.notes.list().to_vec(),
            events: self.events.list().to_vec(),
            clients: self.clients.list().to_vec(),
            users: self.users.list().to_vec(),
        }
    }
}

#[async_trait]
impl RecordSource for InMemoryStore {
    async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        Ok(self.tasks.list().to_vec())
    }

    async fn list_tasks_by_client(&self, client_id: i64) -> AppResult<Vec<Task>> {
        Ok(self.tasks.list_by_client(client_id))
    }

    async fn list_followups(&self) -> AppResult<Vec<FollowUp>> {
        Ok(self.followups.list().to_vec())
    }

    async fn list_followups_by_client(&self, client_id: i64) -> AppResult<Vec<FollowUp>> {
        Ok(self.followups.list_by_client(client_id))
    }

    async fn list_notes(&self) -> AppResult<Vec<Note>> {
        Ok(self.notes.list().to_vec())
    }

    async fn list_notes_by_client(&self, client_id: i64) -> AppResult<Vec<Note>> {
        Ok(self.notes.list_by_client(client_id))
    }

    async fn list_events(&self) -> AppResult<Vec<Event>> {
        Ok(self.events.list().to_vec())
    }

    async fn list_events_by_client(&self, client_id: i64) -> AppResult<Vec<Event>> {
        Ok(self.events.list_by_client(client_id))
    }

    async fn list_clients(&self) -> AppResult<Vec<Client>> {
        Ok(self.clients.list().to_vec())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.users.list().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{fetch_snapshot, Scope};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_insert_assigns_ids() {
        let table: Table<Task> = Table::default();
        let first = table.insert(Task::new(0, "Primera", "2025-03-25"));
        let second = table.insert(Task::new(0, "Segunda", "2025-03-26"));
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(table.list().len(), 2);
    }

    #[test]
    fn test_snapshots_are_immutable() {
        let table = Table::from_rows(vec![Task::new(1, "Original", "2025-03-25")]);
        let before = table.list();

        let mut changed = before[0].clone();
        changed.titulo = "Cambiada".to_string();
        table.update(changed).unwrap();
        table.insert(Task::new(0, "Nueva", "2025-03-27"));

        assert_eq!(before.len(), 1);
        assert_eq!(before[0].titulo, "Original");
        assert_eq!(table.get(1).unwrap().titulo, "Cambiada");
        assert_eq!(table.list().len(), 2);
    }

    #[test]
    fn test_ids_continue_after_seeded_rows() {
        let table = Table::from_rows(vec![Event::new(7, "Feria", "2025-05-01")]);
        assert_eq!(table.insert(Event::new(0, "Expo", "2025-06-01")).id, 8);
    }

    #[test]
    fn test_update_and_delete_missing() {
        let table: Table<Note> = Table::default();
        assert!(matches!(table.update(Note::new(3, "x", "2025-01-01")), Err(AppError::NotFound(_))));
        assert!(matches!(table.delete(3), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_delete_returns_row() {
        let table = Table::from_rows(vec![Note::new(1, "a", "2025-01-01"), Note::new(2, "b", "2025-01-02")]);
        assert_eq!(table.delete(1).unwrap().contenido, "a");
        assert!(table.get(1).is_none());
        assert_eq!(table.list().len(), 1);
    }

    #[tokio::test]
    async fn test_list_by_client() {
        let store = InMemoryStore::new();
        let mut mine = Task::new(0, "Mía", "2025-03-25");
        mine.cliente_id = Some(4);
        store.tasks.insert(mine);
        store.tasks.insert(Task::new(0, "Otra", "2025-03-25"));
        let mut event = Event::new(0, "Visita", "2025-03-26");
        event.cliente_id = Some(4);
        store.events.insert(event);

        let snapshot = fetch_snapshot(&store, Scope::Client(4)).await.unwrap();
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.tasks[0].titulo, "Mía");
        assert_eq!(snapshot.events.len(), 1);

        let all = fetch_snapshot(&store, Scope::All).await.unwrap();
        assert_eq!(all.tasks.len(), 2);
    }

    #[test]
    fn test_from_fixture_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "tasks": [{{"id": 2, "titulo": "Llamada", "fechaLimite": "2025-03-25T10:00:00Z", "estado": "pending"}}],
                "clients": [{{"id": 4, "nombre": "Acme"}}]
            }}"#
        )
        .unwrap();

        let store = InMemoryStore::from_fixture_file(file.path()).unwrap();
        assert_eq!(store.tasks.list().len(), 1);
        assert_eq!(store.clients.get(4).unwrap().nombre, "Acme");
        assert!(store.notes.list().is_empty());
        assert_eq!(store.snapshot().tasks[0].id, 2);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(InMemoryStore::from_json("{ nope"), Err(AppError::Decode(_))));
    }
}
