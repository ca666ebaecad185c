use serde::{Deserialize, Serialize};

/// A scheduled event as stored by the backend. Events may exist without a
/// client and never carry a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub titulo: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub cliente_id: Option<i64>,
}

impl Event {
    pub fn new(id: i64, titulo: impl Into<String>, fecha: impl Into<String>) -> Self {
        Self {
            id,
            titulo: titulo.into(),
            descripcion: None,
            fecha: Some(fecha.into()),
            cliente_id: None,
        }
    }
}
