//! API gateway client: the one place outbound backend requests go through.
//!
//! The gateway resolves the URL against the configured host, merges headers
//! (JSON by default, bearer token when the caller did not set one), reports the
//! call to a [`RequestObserver`], and hands back the response without judging
//! its status. Interpreting failures is left to the domain wrappers in
//! [`crate::api`].

pub mod observer;

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::BackendConfig;
use crate::session::Session;

pub use observer::{
    LogLevel, LoggedEvent, NoopObserver, Phase, RecordingObserver, RequestObserver,
    TracingObserver, PREVIEW_LIMIT,
};

/// How to issue a single request. Mirrors a fetch `RequestInit`.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    /// Used verbatim when present; otherwise `Content-Type: application/json`
    pub headers: Option<HeaderMap>,
    /// Already serialized request body
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn post(body: impl Into<String>) -> Self {
        Self::new(Method::POST).with_body(body)
    }

    pub fn put(body: impl Into<String>) -> Self {
        Self::new(Method::PUT).with_body(body)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }
}

/// A fully received backend response.
///
/// The body is buffered once; logging looked at a clone of the same buffer, so
/// what the caller reads here is the complete payload.
///
/// When the body could not be read the response still carries status and
/// headers; the body is empty and [`ApiResponse::body_error`] says why.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    url: String,
    body: Bytes,
    body_error: Option<String>,
}

impl ApiResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Why the body is missing, if reading it failed mid-stream
    pub fn body_error(&self) -> Option<&str> {
        self.body_error.as_deref()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[derive(Clone)]
pub struct Gateway {
    http: Client,
    host: String,
    session: Session,
    observer: Arc<dyn RequestObserver>,
}

impl Gateway {
    /// Gateway with a default client that logs through `tracing`
    pub fn new(host: impl Into<String>, session: Session) -> Self {
        Self {
            http: Client::new(),
            host: host.into(),
            session,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn from_config(config: &BackendConfig, session: Session) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self::new(config.host.clone(), session).with_client(http))
    }

    pub fn with_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Full URL for a request path
    pub fn resolve_url(&self, path: &str) -> String {
        resolve_url(&self.host, path)
    }

    /// Caller headers (or the JSON default) plus the bearer token when the
    /// caller did not provide an `Authorization` of their own
    pub fn resolve_headers(&self, headers: Option<HeaderMap>) -> HeaderMap {
        let mut headers = headers.unwrap_or_else(default_headers);

        if headers.contains_key(AUTHORIZATION) {
            return headers;
        }

        if let Some(token) = self.session.get_token().filter(|t| !t.is_empty()) {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => {
                    tracing::warn!("session token is not a valid header value; sending without it");
                }
            }
        }

        headers
    }

    /// Issue a request and return the response whatever its status.
    ///
    /// Transport errors from `send` are returned untouched. Observer
    /// callbacks fire around the call but cannot affect its outcome, and a
    /// body that fails mid-read is recorded on the response instead.
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, reqwest::Error> {
        let RequestOptions {
            method,
            headers,
            body,
        } = options;

        let url = self.resolve_url(path);
        let headers = self.resolve_headers(headers);
        let request_id = Uuid::new_v4();

        let mut outbound = LoggedEvent::new(
            LogLevel::Debug,
            "API request",
            request_id,
            &url,
            method.as_str(),
            &headers,
        );
        outbound.body_preview = body.as_deref().map(observer::preview);
        self.observer.on_request(&outbound);

        let mut builder = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let started = Instant::now();
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let mut failed = outbound.follow_up(LogLevel::Error, "API request failed");
                failed.error = Some(e.to_string());
                self.observer.on_error(&failed);
                return Err(e);
            }
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let status = response.status();
        let response_headers = response.headers().clone();
        let final_url = response.url().to_string();

        // A body that cannot be read is only a logging problem here; the
        // caller finds out when it asks for the body
        let (body, body_error) = match response.bytes().await {
            Ok(body) => (body, None),
            Err(e) => {
                let mut failed = outbound.follow_up(LogLevel::Warn, "API response preview failed");
                failed.status = Some(status.as_u16());
                failed.error = Some(e.to_string());
                self.observer.on_error(&failed);
                (Bytes::new(), Some(e.to_string()))
            }
        };

        let api_response = ApiResponse {
            status,
            headers: response_headers,
            url: final_url,
            body,
            body_error,
        };

        if api_response.body_error.is_none() {
            let mut inbound = outbound.follow_up(LogLevel::Info, "API response");
            inbound.status = Some(status.as_u16());
            inbound.content_type = api_response.content_type().map(str::to_string);
            inbound.elapsed_ms = Some(elapsed_ms);
            inbound.response_preview = Some(observer::preview(&String::from_utf8_lossy(
                &api_response.body.clone(),
            )));
            self.observer.on_response(&inbound);
        }

        if !status.is_success() {
            let mut not_ok = outbound.follow_up(LogLevel::Warn, "API non-ok response");
            not_ok.status = Some(status.as_u16());
            self.observer.on_error(&not_ok);
        }

        Ok(api_response)
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("host", &self.host)
            .field("session", &self.session)
            .finish()
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// `host + path`, with `http://` prepended when no scheme is present.
/// An explicit `https://` is left alone.
pub fn resolve_url(host: &str, path: &str) -> String {
    let url = format!("{}{}", host, path);
    if has_scheme(&url) {
        url
    } else {
        format!("http://{}", url)
    }
}

fn has_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
