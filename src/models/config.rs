use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key-value configuration entry as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub config_id: i64,
    pub path: String,
    pub value: String,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewConfigEntry {
    pub path: String,
    pub value: String,
}

/// Only the value of an entry can change; the path is its identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub value: String,
}
