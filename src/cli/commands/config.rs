use clap::Subcommand;
use serde_json::json;

use crate::api::ApiClient;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::{ConfigUpdate, NewConfigEntry};

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "List all configuration entries")]
    List,

    #[command(about = "Create configuration entry")]
    Create {
        #[arg(help = "Entry path, e.g. mail.smtp.host")]
        path: String,
        #[arg(help = "Entry value")]
        value: String,
    },

    #[command(about = "Change the value of an entry")]
    Update {
        #[arg(help = "Config ID")]
        id: i64,
        #[arg(help = "New value")]
        value: String,
    },

    #[command(about = "Delete configuration entry")]
    Delete {
        #[arg(help = "Config ID")]
        id: i64,
    },
}

pub async fn handle(cmd: ConfigCommands, api: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::List => {
            let entries = api.configs().list().await?;
            output_collection(
                &output_format,
                "configs",
                &entries,
                &[("ID", 6), ("PATH", 32), ("UPDATED", 17), ("VALUE", 0)],
                |entry| {
                    vec![
                        entry.config_id.to_string(),
                        entry.path.clone(),
                        entry.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                        entry.value.clone(),
                    ]
                },
            )
        }
        ConfigCommands::Create { path, value } => {
            let entry = api.configs().create(&NewConfigEntry { path, value }).await?;
            output_success(
                &output_format,
                &format!("Config '{}' created with id {}", entry.path, entry.config_id),
                Some(json!({ "config": entry })),
            )
        }
        ConfigCommands::Update { id, value } => {
            let entry = api.configs().update(id, &ConfigUpdate { value }).await?;
            output_success(
                &output_format,
                &format!("Config '{}' updated", entry.path),
                Some(json!({ "config": entry })),
            )
        }
        ConfigCommands::Delete { id } => {
            let ack = api.configs().delete(id).await?;
            let message = ack
                .get("detail")
                .and_then(|d| d.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Config {} deleted", id));
            output_success(&output_format, &message, Some(json!({ "config_id": id })))
        }
    }
}
