pub mod candidate;
pub mod config;
pub mod jobpost;
pub mod token;
pub mod user;

pub use candidate::{Candidate, NewCandidate, VisaType};
pub use config::{ConfigEntry, ConfigUpdate, NewConfigEntry};
pub use jobpost::{EmploymentType, JobPost, NewJobPost};
pub use token::AccessToken;
pub use user::{NewUser, User, UserRole, UserUpdate};

/// Lenient timestamp reading for backend date-times.
///
/// Accepts RFC 3339 with an offset, naive ISO date-times (read as UTC) and the
/// minute-precision form produced by `datetime-local` inputs.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer};

    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

}
