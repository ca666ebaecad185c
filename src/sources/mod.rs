//! Data-access collaborators supplying the raw CRM records.
//!
//! The calendar only reads through [`RecordSource`]; where the records come
//! from (REST backend or an in-memory store) is the caller's choice.

use crate::error::AppResult;
use crate::models::{Client, Event, FollowUp, Note, Task, User};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod rest;
pub mod store;

pub use rest::{RestSource, Session};
pub use store::{InMemoryStore, Record, Table};

/// Which slice of the CRM to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    All,
    Client(i64),
}

#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn list_tasks(&self) -> AppResult<Vec<Task>>;
    async fn list_tasks_by_client(&self, client_id: i64) -> AppResult<Vec<Task>>;

    async fn list_followups(&self) -> AppResult<Vec<FollowUp>>;
    async fn list_followups_by_client(&self, client_id: i64) -> AppResult<Vec<FollowUp>>;

    async fn list_notes(&self) -> AppResult<Vec<Note>>;
    async fn list_notes_by_client(&self, client_id: i64) -> AppResult<Vec<Note>>;

    async fn list_events(&self) -> AppResult<Vec<Event>>;
    async fn list_events_by_client(&self, client_id: i64) -> AppResult<Vec<Event>>;

    async fn list_clients(&self) -> AppResult<Vec<Client>>;
    async fn list_users(&self) -> AppResult<Vec<User>>;
}

/// Everything the normalizer needs, fetched at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceSnapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub followups: Vec<FollowUp>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub users: Vec<User>,
}

/// Fetches every collection concurrently; the first failure fails the snapshot.
pub async fn fetch_snapshot<S>(source: &S, scope: Scope) -> AppResult<SourceSnapshot>
where
    S: RecordSource + ?Sized,
{
    let (tasks, followups, notes, events) = match scope {
        Scope::All => tokio::try_join!(
            source.list_tasks(),
            source.list_followups(),
            source.list_notes(),
            source.list_events(),
        )?,
        Scope::Client(id) => tokio::try_join!(
            source.list_tasks_by_client(id),
            source.list_followups_by_client(id),
            source.list_notes_by_client(id),
            source.list_events_by_client(id),
        )?,
    };
    let (clients, users) = tokio::try_join!(source.list_clients(), source.list_users())?;

    Ok(SourceSnapshot {
        tasks,
        followups,
        notes,
        events,
        clients,
        users,
    })
}
