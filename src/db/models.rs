use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::PrimitiveDateTime;

/// A saved dashboard view: a named set of chart modules.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Dashboard {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) created_by: Option<String>,
    pub(crate) date: PrimitiveDateTime,
    pub(crate) modules: Json<Vec<serde_json::Value>>,
}
