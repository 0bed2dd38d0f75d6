use serde_json::Value;

use crate::error::ClientError;
use crate::gateway::ApiResponse;

/// Turn a non-success response into the error shown to the user.
///
/// Preference order: the JSON `detail` field, then the whole JSON body
/// re-serialized compactly, then the raw body text, then the operation's
/// fixed default.
pub fn normalize_failure(response: &ApiResponse, default_message: &str) -> ClientError {
    ClientError::api(response.status(), failure_message(response.bytes(), default_message))
}

pub fn failure_message(body: &[u8], default_message: &str) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) | Err(_) => {}
        Ok(json) => {
            return match json.get("detail") {
                Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
                // Validation failures arrive as a list of objects
                Some(detail) if !detail.is_null() && !detail.is_string() => detail.to_string(),
                _ => json.to_string(),
            };
        }
    }

    let text = String::from_utf8_lossy(body);
    if text.trim().is_empty() {
        default_message.to_string()
    } else {
        text.into_owned()
    }
}
