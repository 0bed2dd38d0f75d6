use serde::{Deserialize, Serialize};

/// Body of a `v1/auth/login` response. The token is optional so that a 2xx
/// without one can be reported as a failed login instead of a decode error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}
