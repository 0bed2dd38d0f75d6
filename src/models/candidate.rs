use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisaType {
    H1b,
    L1,
    F1,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: NewCandidate,
}

/// Candidate fields supplied when creating or updating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCandidate {
    pub job_post_id: i64,
    pub name: String,
    pub current_location: String,
    pub email: String,
    pub contact_number: String,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub slot_availability: DateTime<Utc>,
    pub rate_card_hourly: f64,
    pub experience_years: f64,
    pub visa_type: VisaType,
    pub willing_to_relocate: bool,
    pub overall_gpt_score: f64,
    pub notice_period_days: i64,
    pub cv_file_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}
