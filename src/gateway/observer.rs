use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, AUTHORIZATION};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Longest body/response excerpt carried by a [`LoggedEvent`], in characters
pub const PREVIEW_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// One observation of a gateway call. Purely informational; nothing reads it back.
#[derive(Debug, Clone, Serialize)]
pub struct LoggedEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: &'static str,
    pub request_id: Uuid,
    pub url: String,
    pub method: String,
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoggedEvent {
    pub fn new(
        level: LogLevel,
        message: &'static str,
        request_id: Uuid,
        url: &str,
        method: &str,
        headers: &HeaderMap,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message,
            request_id,
            url: url.to_string(),
            method: method.to_string(),
            headers: redact_headers(headers),
            status: None,
            content_type: None,
            elapsed_ms: None,
            body_preview: None,
            response_preview: None,
            error: None,
        }
    }

    /// Same request identity, new level and message
    pub fn follow_up(&self, level: LogLevel, message: &'static str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message,
            status: None,
            content_type: None,
            elapsed_ms: None,
            body_preview: None,
            response_preview: None,
            error: None,
            ..self.clone()
        }
    }
}

/// Receives gateway events. Callbacks are synchronous and infallible, so an
/// observer can never delay or fail the request it is watching.
pub trait RequestObserver: Send + Sync {
    fn on_request(&self, event: &LoggedEvent);
    fn on_response(&self, event: &LoggedEvent);
    fn on_error(&self, event: &LoggedEvent);
}

/// Emits every event through `tracing` at the event's level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

macro_rules! emit {
    ($macro:ident, $event:expr) => {
        tracing::$macro!(
            request_id = %$event.request_id,
            url = %$event.url,
            method = %$event.method,
            headers = ?$event.headers,
            status = $event.status,
            content_type = $event.content_type.as_deref(),
            elapsed_ms = $event.elapsed_ms,
            body_preview = $event.body_preview.as_deref(),
            response_preview = $event.response_preview.as_deref(),
            error = $event.error.as_deref(),
            "{}",
            $event.message
        )
    };
}

impl TracingObserver {
    fn emit(&self, event: &LoggedEvent) {
        match event.level {
            LogLevel::Debug => emit!(debug, event),
            LogLevel::Info => emit!(info, event),
            LogLevel::Warn => emit!(warn, event),
            LogLevel::Error => emit!(error, event),
        }
    }
}

impl RequestObserver for TracingObserver {
    fn on_request(&self, event: &LoggedEvent) {
        self.emit(event);
    }

    fn on_response(&self, event: &LoggedEvent) {
        self.emit(event);
    }

    fn on_error(&self, event: &LoggedEvent) {
        self.emit(event);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RequestObserver for NoopObserver {
    fn on_request(&self, _event: &LoggedEvent) {}
    fn on_response(&self, _event: &LoggedEvent) {}
    fn on_error(&self, _event: &LoggedEvent) {}
}

/// Which callback delivered a recorded event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Request,
    Response,
    Error,
}

/// Keeps every event in memory; handy when asserting on what was logged.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<(Phase, LoggedEvent)>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(Phase, LoggedEvent)> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn phase(&self, phase: Phase) -> Vec<LoggedEvent> {
        self.events()
            .into_iter()
            .filter(|(p, _)| *p == phase)
            .map(|(_, e)| e)
            .collect()
    }

    fn record(&self, phase: Phase, event: &LoggedEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push((phase, event.clone()));
        }
    }
}

impl RequestObserver for RecordingObserver {
    fn on_request(&self, event: &LoggedEvent) {
        self.record(Phase::Request, event);
    }

    fn on_response(&self, event: &LoggedEvent) {
        self.record(Phase::Response, event);
    }

    fn on_error(&self, event: &LoggedEvent) {
        self.record(Phase::Error, event);
    }
}

/// First [`PREVIEW_LIMIT`] characters of `text`
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_LIMIT) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

/// Header map for logging; the bearer token is replaced by a short fingerprint.
pub fn redact_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = match value.to_str() {
                Ok(v) if name == AUTHORIZATION => fingerprint_credential(v),
                Ok(v) => v.to_string(),
                Err(_) => "<binary>".to_string(),
            };
            (name.as_str().to_string(), shown)
        })
        .collect()
}

fn fingerprint_credential(value: &str) -> String {
    let (scheme, secret) = value.split_once(' ').unwrap_or(("", value));
    let digest = format!("{:x}", Sha256::digest(secret.as_bytes()));
    if scheme.is_empty() {
        format!("sha256:{}", &digest[..12])
    } else {
        format!("{} sha256:{}", scheme, &digest[..12])
    }
}
