pub mod remote;

use anyhow::Context as _;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::config::LoggingConfig;

pub use remote::{LogSinkGuard, RemoteLogLayer, RemoteLogRecord};

/// Install the global subscriber: human-readable output on stderr, plus the
/// remote collector when one is configured. `RUST_LOG` wins over the
/// configured default filter.
///
/// Needs a running tokio runtime when a remote endpoint is set.
pub fn init(config: &LoggingConfig) -> anyhow::Result<Option<LogSinkGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))
        .context("invalid log filter")?;

    let (remote, guard) = match config.endpoint.as_deref() {
        Some(endpoint) => {
            let endpoint = Url::parse(endpoint)
                .with_context(|| format!("invalid logging endpoint '{}'", endpoint))?;
            let (layer, guard) = remote::spawn(endpoint, reqwest::Client::new());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(remote)
        .try_init()
        .context("logging already initialized")?;

    Ok(guard)
}
