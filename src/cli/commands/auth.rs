use chrono::Utc;
use clap::Subcommand;
use serde_json::json;

use crate::api::ApiClient;
use crate::auth::peek_claims;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::{NewUser, UserRole};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the backend")]
    Login {
        #[arg(help = "Username (email)")]
        username: String,
        #[arg(long, env = "HIREHUB_PASSWORD", hide_env_values = true, help = "Password")]
        password: Option<String>,
    },

    #[command(about = "Forget the stored token and role")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show current user information")]
    Whoami,

    #[command(about = "Register new user")]
    Register {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, env = "HIREHUB_PASSWORD", hide_env_values = true, help = "Password")]
        password: Option<String>,
        #[arg(long, help = "Display name")]
        name: Option<String>,
        #[arg(long, default_value = "user", help = "Role: admin or user")]
        role: UserRole,
        #[arg(long, help = "Create the account disabled")]
        inactive: bool,
    },
}

pub async fn handle(cmd: AuthCommands, api: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { username, password } => {
            let password = require_password(password)?;
            let signed_in = api.auth().sign_in(&username, &password).await?;

            if let Err(e) = &signed_in.user {
                output_warning(&output_format, &format!("Logged in, but user details are unavailable: {}", e));
            }

            output_success(
                &output_format,
                &format!("Logged in as {}", username),
                Some(json!({
                    "username": username,
                    "role": api.session().get_user_role(),
                })),
            )
        }
        AuthCommands::Logout => {
            api.auth().logout();
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let snapshot = api.session().snapshot();
            let claims = snapshot.token.as_deref().and_then(peek_claims);
            let expires_at = claims.as_ref().and_then(|c| c.expires_at());
            let expired = claims.as_ref().map(|c| c.is_expired_at(Utc::now()));

            match output_format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "authenticated": api.session().is_authenticated(),
                            "host": api.gateway().host(),
                            "role": snapshot.role,
                            "advisory_claims": {
                                "subject": claims.as_ref().and_then(|c| c.sub.clone()),
                                "expires_at": expires_at,
                                "expired": expired,
                            }
                        }))?
                    );
                }
                OutputFormat::Text => {
                    println!("Host: {}", api.gateway().host());
                    if !api.session().is_authenticated() {
                        println!("Not logged in");
                        return Ok(());
                    }
                    println!("Logged in");
                    if let Some(role) = &snapshot.role {
                        println!("Role: {} (advisory)", role);
                    }
                    if let Some(sub) = claims.as_ref().and_then(|c| c.sub.as_ref()) {
                        println!("Token subject: {}", sub);
                    }
                    if let Some(exp) = expires_at {
                        let note = if expired == Some(true) { " (expired)" } else { "" };
                        println!("Token expires: {}{}", exp.format("%Y-%m-%d %H:%M:%S UTC"), note);
                    }
                }
            }
            Ok(())
        }
        AuthCommands::Whoami => {
            let user = api.auth().load_current_user().await?;
            match output_format {
                OutputFormat::Json => output_record(&output_format, "user", &user),
                OutputFormat::Text => {
                    println!("Email: {}", user.email);
                    if let Some(name) = &user.name {
                        println!("Name: {}", name);
                    }
                    println!("Role: {}", user.role.as_str());
                    println!("Active: {}", user.is_active);
                    Ok(())
                }
            }
        }
        AuthCommands::Register { email, password, name, role, inactive } => {
            let new_user = NewUser {
                email,
                password: require_password(password)?,
                name,
                role,
                is_active: !inactive,
            };
            let user = api.users().register(&new_user).await?;

            output_success(
                &output_format,
                &format!("User '{}' registered with id {}", user.email, user.id),
                Some(json!({ "user": user })),
            )
        }
    }
}

fn require_password(password: Option<String>) -> anyhow::Result<String> {
    password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Password required (use --password or HIREHUB_PASSWORD)"))
}
