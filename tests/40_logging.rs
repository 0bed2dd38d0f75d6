mod common;

use std::sync::{Arc, Mutex};

use anyhow::Result;
use common::MockBackend;
use hirehub_console::logging::remote::{self, HTTP_STACK_TARGETS};
use serde_json::Value;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;
use url::Url;

/// Sees every event, unfiltered, so the test knows the HTTP stack really spoke
#[derive(Clone, Default)]
struct TargetRecorder(Arc<Mutex<Vec<String>>>);

impl<S: Subscriber> Layer<S> for TargetRecorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.0.lock().unwrap().push(event.metadata().target().to_string());
    }
}

fn is_http_stack(target: &str) -> bool {
    let root = target.split("::").next().unwrap_or(target);
    HTTP_STACK_TARGETS.contains(&root)
}

fn collected(collector: &MockBackend) -> Result<Vec<Value>> {
    collector
        .requests()
        .iter()
        .filter(|r| r.method == "POST" && r.path == "/api/logs")
        .map(|r| Ok(serde_json::from_str(&r.body)?))
        .collect()
}

#[tokio::test]
async fn collector_receives_events_but_not_its_own_traffic() -> Result<()> {
    let collector = MockBackend::spawn().await?;
    collector.respond("POST", "/api/logs", 200, "application/json", "{}");
    let endpoint = Url::parse(&format!("http://{}logs", collector.host))?;

    let (layer, sink) = remote::spawn(endpoint, reqwest::Client::new());
    let everything = TargetRecorder::default();
    let subscriber = tracing_subscriber::registry()
        .with(layer)
        .with(everything.clone());
    let _default = tracing::subscriber::set_default(subscriber);

    tracing::warn!(status = 502u64, url = "http://h/v1/users", "API non-ok response");
    reqwest::Client::new()
        .get(format!("http://{}v1/config", collector.host))
        .send()
        .await?;
    tracing::info!(attempt = 1u64, "after request");

    // Records queued while the first batch was posted land behind the first marker
    sink.flush().await;
    sink.flush().await;

    let records = collected(&collector)?;
    let messages: Vec<&str> = records.iter().filter_map(|r| r["message"].as_str()).collect();
    assert_eq!(messages, ["API non-ok response", "after request"]);

    for record in &records {
        let target = record["meta"]["target"].as_str().unwrap_or_default();
        assert!(!is_http_stack(target), "forwarded HTTP stack event from {target}");
    }

    let seen = everything.0.lock().unwrap().clone();
    assert!(
        seen.iter().any(|t| is_http_stack(t)),
        "expected the HTTP client to emit events, saw {seen:?}"
    );
    Ok(())
}

#[tokio::test]
async fn records_have_the_collector_shape() -> Result<()> {
    let collector = MockBackend::spawn().await?;
    collector.respond("POST", "/api/logs", 200, "application/json", "{}");
    let endpoint = Url::parse(&format!("http://{}logs", collector.host))?;

    let (layer, sink) = remote::spawn(endpoint, reqwest::Client::new());
    let _default = tracing::subscriber::set_default(tracing_subscriber::registry().with(layer));

    tracing::error!(request_id = "r-1", elapsed_ms = 12u64, ok = false, "API request failed");
    sink.flush().await;

    let records = collected(&collector)?;
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["level"], "error");
    assert_eq!(record["message"], "API request failed");
    assert!(chrono::DateTime::parse_from_rfc3339(record["ts"].as_str().unwrap()).is_ok());
    assert_eq!(record["meta"]["request_id"], "r-1");
    assert_eq!(record["meta"]["elapsed_ms"], 12);
    assert_eq!(record["meta"]["ok"], false);
    assert_eq!(
        record.as_object().unwrap().keys().collect::<Vec<_>>(),
        ["ts", "level", "message", "meta"]
    );

    let posted = collector.last_request();
    assert_eq!(posted.header("content-type"), Some("application/json"));
    Ok(())
}

#[tokio::test]
async fn flush_waits_for_every_queued_record() -> Result<()> {
    let collector = MockBackend::spawn().await?;
    collector.respond("POST", "/api/logs", 200, "application/json", "{}");
    let endpoint = Url::parse(&format!("http://{}logs", collector.host))?;

    let (layer, sink) = remote::spawn(endpoint, reqwest::Client::new());
    let _default = tracing::subscriber::set_default(tracing_subscriber::registry().with(layer));

    for n in 0..5u64 {
        tracing::info!(n, "queued");
    }
    assert!(collected(&collector)?.len() < 5);

    sink.flush().await;

    let records = collected(&collector)?;
    let order: Vec<u64> = records.iter().filter_map(|r| r["meta"]["n"].as_u64()).collect();
    assert_eq!(order, [0, 1, 2, 3, 4]);
    Ok(())
}
