use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const CLIENT_NOT_FOUND: &str = "Cliente no encontrado";
pub const USER_NOT_FOUND: &str = "Usuario no encontrado";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub empresa: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Client {
    pub fn new(id: i64, nombre: impl Into<String>) -> Self {
        Self {
            id,
            nombre: nombre.into(),
            empresa: None,
            email: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    pub fn new(id: i64, nombre: impl Into<String>) -> Self {
        Self {
            id,
            nombre: nombre.into(),
            email: None,
        }
    }
}

/// Display-only link to a client or user. Carries no ownership of the
/// referenced record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
    pub name: String,
    /// False when the id did not resolve and `name` holds the not-found label.
    pub resolved: bool,
}

/// Id → display name lookup for clients and users.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    clients: HashMap<i64, String>,
    users: HashMap<i64, String>,
}

impl Directory {
    pub fn new(clients: &[Client], users: &[User]) -> Self {
        Self {
            clients: clients.iter().map(|c| (c.id, c.nombre.clone())).collect(),
            users: users.iter().map(|u| (u.id, u.nombre.clone())).collect(),
        }
    }

    pub fn client(&self, id: i64) -> EntityRef {
        lookup(&self.clients, id, CLIENT_NOT_FOUND)
    }

    pub fn user(&self, id: i64) -> EntityRef {
        lookup(&self.users, id, USER_NOT_FOUND)
    }
}

fn lookup(names: &HashMap<i64, String>, id: i64, missing: &str) -> EntityRef {
    match names.get(&id) {
        Some(name) => EntityRef {
            id,
            name: name.clone(),
            resolved: true,
        },
        None => EntityRef {
            id,
            name: missing.to_string(),
            resolved: false,
        },
    }
}
