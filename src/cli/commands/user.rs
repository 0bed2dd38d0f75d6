use clap::Subcommand;
use serde_json::json;

use crate::api::ApiClient;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::{UserRole, UserUpdate};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "List all users")]
    List,

    #[command(about = "Update user fields")]
    Update {
        #[arg(help = "User ID")]
        id: i64,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, help = "Role: admin or user")]
        role: Option<UserRole>,
        #[arg(long, help = "true to enable, false to disable")]
        active: Option<bool>,
        #[arg(long)]
        password: Option<String>,
    },
}

pub async fn handle(cmd: UserCommands, api: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::List => {
            let users = api.users().list().await?;
            output_collection(
                &output_format,
                "users",
                &users,
                &[("ID", 6), ("EMAIL", 32), ("NAME", 24), ("ROLE", 6), ("ACTIVE", 0)],
                |u| {
                    vec![
                        u.id.to_string(),
                        u.email.clone(),
                        u.name.clone().unwrap_or_default(),
                        u.role.as_str().to_string(),
                        (if u.is_active { "yes" } else { "no" }).to_string(),
                    ]
                },
            )
        }
        UserCommands::Update { id, email, name, role, active, password } => {
            let update = UserUpdate {
                email,
                password,
                name,
                role,
                is_active: active,
            };
            let user = api.users().update(id, &update).await?;
            output_success(
                &output_format,
                &format!("User '{}' updated", user.email),
                Some(json!({ "user": user })),
            )
        }
    }
}
