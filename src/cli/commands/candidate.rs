use clap::Subcommand;
use serde_json::json;

use crate::api::{ApiClient, Page};
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::NewCandidate;

#[derive(Subcommand)]
pub enum CandidateCommands {
    #[command(about = "List candidates page by page")]
    List {
        #[arg(long, default_value_t = 0, help = "Number of candidates to skip")]
        skip: u32,
        #[arg(long, default_value_t = 10, help = "Page size")]
        limit: u32,
    },

    #[command(about = "Create candidate from a JSON file or stdin")]
    Create {
        #[arg(long, default_value = "-", help = "JSON file path, '-' for stdin")]
        file: String,
    },

    #[command(about = "Replace candidate fields from a JSON file or stdin")]
    Update {
        #[arg(help = "Candidate ID")]
        id: i64,
        #[arg(long, default_value = "-", help = "JSON file path, '-' for stdin")]
        file: String,
    },
}

pub async fn handle(cmd: CandidateCommands, api: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        CandidateCommands::List { skip, limit } => {
            let candidates = api.candidates().list(Page { skip, limit }).await?;
            output_collection(
                &output_format,
                "candidates",
                &candidates,
                &[("ID", 6), ("NAME", 24), ("EMAIL", 28), ("JOB", 5), ("SCORE", 6), ("LOCATION", 0)],
                |c| {
                    vec![
                        c.id.to_string(),
                        c.details.name.clone(),
                        c.details.email.clone(),
                        c.details.job_post_id.to_string(),
                        format!("{:.1}", c.details.overall_gpt_score),
                        c.details.current_location.clone(),
                    ]
                },
            )
        }
        CandidateCommands::Create { file } => {
            let candidate: NewCandidate = read_json_input(&file)?;
            let created = api.candidates().create(&candidate).await?;
            output_success(
                &output_format,
                &format!("Candidate '{}' created with id {}", created.details.name, created.id),
                Some(json!({ "candidate": created })),
            )
        }
        CandidateCommands::Update { id, file } => {
            let candidate: NewCandidate = read_json_input(&file)?;
            let updated = api.candidates().update(id, &candidate).await?;
            output_success(
                &output_format,
                &format!("Candidate {} updated", updated.id),
                Some(json!({ "candidate": updated })),
            )
        }
    }
}
