use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub titulo: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub fecha_limite: Option<String>,
    #[serde(default)]
    pub estado: TaskStatus,
    #[serde(default)]
    pub prioridad: Option<String>,
    #[serde(default)]
    pub cliente_id: Option<i64>,
    #[serde(default)]
    pub usuario_id: Option<i64>,
}

impl Task {
    pub fn new(id: i64, titulo: impl Into<String>, fecha_limite: impl Into<String>) -> Self {
        Self {
            id,
            titulo: titulo.into(),
            descripcion: None,
            fecha_limite: Some(fecha_limite.into()),
            estado: TaskStatus::Pending,
            prioridad: None,
            cliente_id: None,
            usuario_id: None,
        }
    }
}
