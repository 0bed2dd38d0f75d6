use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::SessionConfig;
use crate::session::{FileStorage, Session};

pub const SESSION_FILE: &str = "session.json";

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("HIREHUB_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("hirehub").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// Session for this invocation: shared through the config directory when
/// persistence is on, otherwise gone when the process exits
pub fn build_session(config: &SessionConfig) -> anyhow::Result<Session> {
    if !config.persist {
        return Ok(Session::in_memory());
    }

    let session_file = get_config_dir()?.join(SESSION_FILE);
    Ok(Session::new(Arc::new(FileStorage::new(session_file))))
}
