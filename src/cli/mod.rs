pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::ClientError;
use crate::gateway::Gateway;

#[derive(Parser)]
#[command(name = "hirehub")]
#[command(about = "HireHub CLI - console for the applicant-tracking backend")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Backend host, e.g. localhost:8000/api/")]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Authentication and token management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Key-value configuration entries")]
    Config {
        #[command(subcommand)]
        cmd: commands::config::ConfigCommands,
    },

    #[command(about = "Candidate management")]
    Candidate {
        #[command(subcommand)]
        cmd: commands::candidate::CandidateCommands,
    },

    #[command(about = "Job post management")]
    Jobpost {
        #[command(subcommand)]
        cmd: commands::jobpost::JobPostCommands,
    },

    #[command(about = "User administration")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = config.with_host(cli.host);

    let session = config::build_session(&config.session)?;
    let gateway = Gateway::from_config(&config.backend, session)?;
    let api = ApiClient::new(gateway);

    let result = match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &api, output_format.clone()).await,
        Commands::Config { cmd } => commands::config::handle(cmd, &api, output_format.clone()).await,
        Commands::Candidate { cmd } => commands::candidate::handle(cmd, &api, output_format.clone()).await,
        Commands::Jobpost { cmd } => commands::jobpost::handle(cmd, &api, output_format.clone()).await,
        Commands::User { cmd } => commands::user::handle(cmd, &api, output_format.clone()).await,
    };

    // JSON callers get a machine-readable failure on stdout as well
    if let (Err(e), OutputFormat::Json) = (&result, &output_format) {
        let code = e.downcast_ref::<ClientError>().map(ClientError::error_code);
        utils::output_error(&output_format, &e.to_string(), code)?;
    }

    result
}
