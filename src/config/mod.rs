use serde::{Deserialize, Serialize};
use std::env;

/// Backend host baked in at compile time, used when nothing overrides it at runtime
pub const BUILD_BACKEND_HOST: &str = match option_env!("HIREHUB_BACKEND_HOST") {
    Some(host) => host,
    None => "localhost:8000/api/",
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Host (optionally with scheme and path prefix) that every request path is appended to
    pub host: String,
    /// Transport timeout; `None` leaves it to reqwest defaults
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub default_filter: String,
    /// Remote collector for log events; disabled when `None`
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Keep the session in the CLI config directory between invocations
    pub persist: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Backend overrides
        if let Ok(v) = env::var("HIREHUB_BACKEND_HOST") {
            if !v.trim().is_empty() {
                self.backend.host = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("HIREHUB_HTTP_TIMEOUT_SECS") {
            self.backend.timeout_secs = v.parse().ok().filter(|secs| *secs > 0);
        }

        // Logging overrides
        if let Ok(v) = env::var("HIREHUB_LOG_FILTER") {
            if !v.trim().is_empty() {
                self.logging.default_filter = v;
            }
        }
        if let Ok(v) = env::var("HIREHUB_LOGGING_ENDPOINT") {
            let v = v.trim();
            self.logging.endpoint = if v.is_empty() { None } else { Some(v.to_string()) };
        }

        // Session overrides
        if let Ok(v) = env::var("HIREHUB_SESSION_PERSIST") {
            self.session.persist = v.parse().unwrap_or(self.session.persist);
        }

        self
    }

    /// Replace the backend host, e.g. from a `--host` flag
    pub fn with_host(mut self, host: Option<String>) -> Self {
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            self.backend.host = host;
        }
        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            backend: BackendConfig {
                host: BUILD_BACKEND_HOST.to_string(),
                timeout_secs: None,
            },
            logging: LoggingConfig {
                default_filter: "hirehub_console=debug,hirehub=debug".to_string(),
                endpoint: None,
            },
            session: SessionConfig { persist: true },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            backend: BackendConfig {
                host: BUILD_BACKEND_HOST.to_string(),
                timeout_secs: None,
            },
            logging: LoggingConfig {
                default_filter: "hirehub_console=info,hirehub=info".to_string(),
                endpoint: None,
            },
            session: SessionConfig { persist: true },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            backend: BackendConfig {
                host: BUILD_BACKEND_HOST.to_string(),
                timeout_secs: None,
            },
            logging: LoggingConfig {
                default_filter: "hirehub_console=warn,hirehub=warn".to_string(),
                endpoint: None,
            },
            session: SessionConfig { persist: true },
        }
    }
}
