use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub contenido: String,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub cliente_id: Option<i64>,
    #[serde(default)]
    pub usuario_id: Option<i64>,
}

impl Note {
    pub fn new(id: i64, contenido: impl Into<String>, fecha: impl Into<String>) -> Self {
        Self {
            id,
            contenido: contenido.into(),
            fecha: Some(fecha.into()),
            cliente_id: None,
            usuario_id: None,
        }
    }
}
