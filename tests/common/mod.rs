#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};

use hirehub_console::gateway::RecordingObserver;
use hirehub_console::{ApiClient, Gateway, Session};

pub const VALID_USERNAME: &str = "admin@example.com";
pub const VALID_PASSWORD: &str = "s3cret pass&word";
pub const ISSUED_TOKEN: &str = "abc123";

/// One request as the mock backend saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
struct Canned {
    status: u16,
    content_type: &'static str,
    body: String,
}

#[derive(Default)]
struct Shared {
    requests: Mutex<Vec<RecordedRequest>>,
    overrides: Mutex<HashMap<(String, String), Canned>>,
}

/// In-process stand-in for the ATS backend, mounted under `/api/`
pub struct MockBackend {
    pub port: u16,
    /// Host without scheme, the way the console is usually configured
    pub host: String,
    shared: Arc<Shared>,
}

impl MockBackend {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock backend")?;

        let shared = Arc::new(Shared::default());
        let app = Router::new().fallback(handle).with_state(shared.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            port,
            host: format!("127.0.0.1:{}/api/", port),
            shared,
        })
    }

    /// Serve a fixed response for `method path` instead of the built-in behaviour
    pub fn respond(&self, method: &str, path: &str, status: u16, content_type: &'static str, body: impl Into<String>) {
        self.shared.overrides.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            Canned {
                status,
                content_type,
                body: body.into(),
            },
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().last().cloned().expect("no request reached the mock backend")
    }

    /// API client on a fresh in-memory session, plus the observer that saw its traffic
    pub fn client(&self) -> (ApiClient, Arc<RecordingObserver>) {
        self.client_with_session(Session::in_memory())
    }

    pub fn client_with_session(&self, session: Session) -> (ApiClient, Arc<RecordingObserver>) {
        let observer = Arc::new(RecordingObserver::new());
        let gateway = Gateway::new(self.host.clone(), session).with_observer(observer.clone());
        (ApiClient::new(gateway), observer)
    }
}

/// Raw listener that promises `Content-Length: 100`, sends ten bytes and hangs up.
/// Returns the host to point a gateway at.
pub async fn spawn_truncating_server() -> Result<String> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind truncating server")?;

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n[{\"id\": 1,",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });

    Ok(format!("127.0.0.1:{}/api/", port))
}

async fn handle(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers: headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    shared.requests.lock().unwrap().push(recorded.clone());

    let canned = shared
        .overrides
        .lock()
        .unwrap()
        .get(&(recorded.method.clone(), recorded.path.clone()))
        .cloned();
    if let Some(canned) = canned {
        return (
            StatusCode::from_u16(canned.status).unwrap(),
            [(header::CONTENT_TYPE, canned.content_type)],
            canned.body,
        )
            .into_response();
    }

    route(&recorded)
}

fn json_response(status: StatusCode, body: Value) -> Response {
    (status, axum::Json(body)).into_response()
}

fn route(req: &RecordedRequest) -> Response {
    let segments: Vec<&str> = req
        .path
        .trim_start_matches("/api/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    match (req.method.as_str(), segments.as_slice()) {
        ("POST", ["v1", "auth", "login"]) => login(req),
        ("GET", ["v1", "auth", "me"]) => match req.header("authorization") {
            Some(auth) if auth == format!("Bearer {}", ISSUED_TOKEN) => json_response(StatusCode::OK, admin_user()),
            _ => json_response(StatusCode::UNAUTHORIZED, json!({ "detail": "Invalid token" })),
        },
        ("POST", ["v1", "auth", "register"]) => {
            let mut user: Value = serde_json::from_str(&req.body).unwrap_or(Value::Null);
            if user.get("email").is_none() {
                return json_response(StatusCode::UNPROCESSABLE_ENTITY, json!({ "detail": [{ "msg": "field required" }] }));
            }
            user["id"] = json!(12);
            user["created_at"] = json!("2024-06-01T08:00:00");
            if let Some(obj) = user.as_object_mut() {
                obj.remove("password");
            }
            json_response(StatusCode::OK, user)
        }
        ("PUT", ["v1", "auth", id]) => {
            let patch: Value = serde_json::from_str(&req.body).unwrap_or(Value::Null);
            let mut user = admin_user();
            user["id"] = json!(id.parse::<i64>().unwrap_or(0));
            if let Some(fields) = patch.as_object() {
                for (k, v) in fields {
                    if k != "password" {
                        user[k] = v.clone();
                    }
                }
            }
            json_response(StatusCode::OK, user)
        }
        ("GET", ["v1", "users"]) => json_response(StatusCode::OK, json!([admin_user()])),
        ("GET", ["v1", "config"]) => json_response(
            StatusCode::OK,
            json!([
                { "config_id": 1, "path": "mail.smtp.host", "value": "smtp.example.com", "updated_at": "2024-05-01T10:00:00" },
                { "config_id": 5, "path": "ui.page_size", "value": "25", "updated_at": "2024-05-02T11:30:00+00:00" }
            ]),
        ),
        ("POST", ["v1", "config"]) => {
            let entry: Value = serde_json::from_str(&req.body).unwrap_or(Value::Null);
            json_response(
                StatusCode::OK,
                json!({ "config_id": 9, "path": entry["path"], "value": entry["value"], "updated_at": "2024-05-03T09:00:00" }),
            )
        }
        ("PUT", ["v1", "config", id]) => {
            let update: Value = serde_json::from_str(&req.body).unwrap_or(Value::Null);
            json_response(
                StatusCode::OK,
                json!({ "config_id": id.parse::<i64>().unwrap_or(0), "path": "ui.page_size", "value": update["value"], "updated_at": "2024-05-03T09:00:00" }),
            )
        }
        ("DELETE", ["v1", "config", "5"]) => json_response(StatusCode::OK, json!({ "detail": "Config deleted" })),
        ("DELETE", ["v1", "config", _]) => json_response(StatusCode::NOT_FOUND, json!({ "detail": "Config not found" })),
        ("GET", ["v1", "candidates"]) => json_response(StatusCode::OK, json!([candidate(7)])),
        ("POST", ["v1", "candidates"]) => {
            let mut created: Value = serde_json::from_str(&req.body).unwrap_or(Value::Null);
            created["id"] = json!(21);
            created["created_at"] = json!("2024-06-01T08:00:00");
            json_response(StatusCode::OK, created)
        }
        ("PUT", ["v1", "candidates", id]) => {
            let mut updated: Value = serde_json::from_str(&req.body).unwrap_or(Value::Null);
            updated["id"] = json!(id.parse::<i64>().unwrap_or(0));
            updated["created_at"] = json!("2024-05-01T12:00:00");
            json_response(StatusCode::OK, updated)
        }
        ("GET", ["v1", "jobposts"]) => json_response(StatusCode::OK, json!([job_post(3)])),
        ("POST", ["v1", "jobposts"]) | ("PUT", ["v1", "jobposts", _]) => {
            let mut post: Value = serde_json::from_str(&req.body).unwrap_or(Value::Null);
            post["id"] = json!(segments.get(2).and_then(|id| id.parse::<i64>().ok()).unwrap_or(4));
            post["created_at"] = json!("2024-06-01T08:00:00");
            json_response(StatusCode::OK, post)
        }
        _ => json_response(StatusCode::NOT_FOUND, json!({ "detail": "Not Found" })),
    }
}

fn login(req: &RecordedRequest) -> Response {
    if req.header("content-type") != Some("application/x-www-form-urlencoded") {
        return json_response(StatusCode::UNPROCESSABLE_ENTITY, json!({ "detail": "expected form data" }));
    }

    let form: HashMap<String, String> = url::form_urlencoded::parse(req.body.as_bytes())
        .into_owned()
        .collect();

    match (form.get("username"), form.get("password")) {
        (Some(u), Some(p)) if u == VALID_USERNAME && p == VALID_PASSWORD => json_response(
            StatusCode::OK,
            json!({ "access_token": ISSUED_TOKEN, "token_type": "bearer" }),
        ),
        _ => json_response(StatusCode::UNAUTHORIZED, json!({ "detail": "Invalid credentials" })),
    }
}

pub fn admin_user() -> Value {
    json!({
        "id": 1,
        "email": VALID_USERNAME,
        "name": "Admin",
        "role": "admin",
        "is_active": true,
        "password": null,
        "created_at": "2024-01-15T09:00:00"
    })
}

pub fn candidate(id: i64) -> Value {
    let mut value = new_candidate();
    value["id"] = json!(id);
    value["created_at"] = json!("2024-05-01T12:00:00");
    value
}

pub fn new_candidate() -> Value {
    json!({
        "job_post_id": 3,
        "name": "Ada Lovelace",
        "current_location": "London",
        "email": "ada@example.com",
        "contact_number": "+44 20 0000",
        "slot_availability": "2024-05-10T15:30:00Z",
        "rate_card_hourly": 95.0,
        "experience_years": 12.5,
        "visa_type": "other",
        "willing_to_relocate": true,
        "overall_gpt_score": 8.7,
        "notice_period_days": 30,
        "cv_file_url": "https://cv.example.com/ada.pdf",
        "remarks": "strong analytical background"
    })
}

pub fn job_post(id: i64) -> Value {
    let mut value = new_job_post();
    value["id"] = json!(id);
    value["created_at"] = json!("2024-04-20T07:45:00");
    value
}

pub fn new_job_post() -> Value {
    json!({
        "title": "Senior Rust Engineer",
        "company_intro": "We build hiring tools.",
        "position": "Engineer",
        "location": "Remote",
        "employment_type": "full_time",
        "department": "Platform",
        "position_summary": "Own the backend services.",
        "key_responsibilities": ["design APIs", "review code"],
        "required_qualifications": ["5+ years Rust"],
        "preferred_qualifications": { "nice_to_have": ["tokio", "axum"] },
        "addons": null,
        "why_join_us": "Interesting problems."
    })
}
