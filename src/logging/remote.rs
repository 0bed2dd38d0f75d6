//! Forwards tracing events to a remote log collector.
//!
//! Events are queued on an unbounded channel and POSTed by a background task,
//! so emitting a log never waits on the network and never fails. Delivery
//! problems are reported on stderr and otherwise dropped.
//!
//! The layer handed out by [`spawn`] carries a per-layer [`Targets`] filter
//! that drops the HTTP stack; the sink's own POSTs would feed back otherwise.

use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::{Filtered, LevelFilter, Targets};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;
use url::Url;

/// Crates whose events never reach the collector
pub const HTTP_STACK_TARGETS: [&str; 7] = ["hyper", "hyper_util", "reqwest", "h2", "rustls", "tower", "want"];

/// Wire shape expected by the collector
#[derive(Debug, Clone, Serialize)]
pub struct RemoteLogRecord {
    pub ts: String,
    pub level: String,
    pub message: String,
    pub meta: Map<String, Value>,
}

enum SinkMessage {
    Record(RemoteLogRecord),
    Flush(oneshot::Sender<()>),
}

pub struct RemoteLogLayer {
    sender: mpsc::UnboundedSender<SinkMessage>,
}

/// Handle on the delivery task. Call [`LogSinkGuard::flush`] before exit so
/// queued events are not lost.
pub struct LogSinkGuard {
    sender: mpsc::UnboundedSender<SinkMessage>,
    _worker: JoinHandle<()>,
}

impl LogSinkGuard {
    /// Wait until everything queued so far has been delivered (or given up on)
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.sender.send(SinkMessage::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }
}

/// Everything at any level, except the HTTP stack
pub fn forwardable() -> Targets {
    HTTP_STACK_TARGETS
        .iter()
        .fold(Targets::new().with_default(LevelFilter::TRACE), |targets, krate| {
            targets.with_target(*krate, LevelFilter::OFF)
        })
}

/// Start the delivery task. Must be called from within a tokio runtime.
pub fn spawn<S>(
    endpoint: Url,
    client: reqwest::Client,
) -> (Filtered<RemoteLogLayer, Targets, S>, LogSinkGuard)
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let (sender, receiver) = mpsc::unbounded_channel();
    let worker = tokio::spawn(deliver(endpoint, client, receiver));

    (
        RemoteLogLayer {
            sender: sender.clone(),
        }
        .with_filter(forwardable()),
        LogSinkGuard {
            sender,
            _worker: worker,
        },
    )
}

async fn deliver(
    endpoint: Url,
    client: reqwest::Client,
    mut receiver: mpsc::UnboundedReceiver<SinkMessage>,
) {
    while let Some(message) = receiver.recv().await {
        match message {
            SinkMessage::Record(record) => {
                let sent = client.post(endpoint.clone()).json(&record).send().await;
                match sent {
                    Ok(response) if !response.status().is_success() => {
                        eprintln!("logger: collector answered {}", response.status());
                    }
                    Ok(_) => {}
                    Err(e) => eprintln!("logger: failed to send logs to server: {}", e),
                }
            }
            SinkMessage::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

impl<S> Layer<S> for RemoteLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut meta = Map::new();
        event.record(&mut FieldVisitor(&mut meta));

        let message = match meta.remove("message") {
            Some(Value::String(message)) => message,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        meta.insert("target".to_string(), Value::from(metadata.target()));

        let record = RemoteLogRecord {
            ts: chrono::Utc::now().to_rfc3339(),
            level: metadata.level().as_str().to_ascii_lowercase(),
            message,
            meta,
        };

        // Receiver gone means the sink was shut down; nothing to do
        let _ = self.sender.send(SinkMessage::Record(record));
    }
}

/// Field visitor that extracts tracing event fields into a JSON map
struct FieldVisitor<'a>(&'a mut Map<String, Value>);

impl<'a> tracing::field::Visit for FieldVisitor<'a> {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(format!("{:?}", value)));
    }
}
