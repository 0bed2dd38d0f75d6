use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPost {
    pub id: i64,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: NewJobPost,
}

/// Job post fields; the list-like sections are free-form JSON on the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJobPost {
    pub title: String,
    pub company_intro: String,
    pub position: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub department: String,
    pub position_summary: String,
    pub key_responsibilities: Value,
    pub required_qualifications: Value,
    pub preferred_qualifications: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addons: Option<Value>,
    pub why_join_us: String,
}
