use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub id: i64,
    /// Contact channel, e.g. "Llamada" or "Email".
    pub tipo: String,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub notas: Option<String>,
    #[serde(default)]
    pub cliente_id: Option<i64>,
    #[serde(default)]
    pub usuario_id: Option<i64>,
}

impl FollowUp {
    pub fn new(id: i64, tipo: impl Into<String>, fecha: impl Into<String>) -> Self {
        Self {
            id,
            tipo: tipo.into(),
            fecha: Some(fecha.into()),
            notas: None,
            cliente_id: None,
            usuario_id: None,
        }
    }
}
