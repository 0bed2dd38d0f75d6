use clap::Subcommand;
use serde_json::json;

use crate::api::ApiClient;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::{EmploymentType, NewJobPost};

#[derive(Subcommand)]
pub enum JobPostCommands {
    #[command(about = "List job posts")]
    List,

    #[command(about = "Create job post from a JSON file or stdin")]
    Create {
        #[arg(long, default_value = "-", help = "JSON file path, '-' for stdin")]
        file: String,
    },

    #[command(about = "Replace job post fields from a JSON file or stdin")]
    Update {
        #[arg(help = "Job post ID")]
        id: i64,
        #[arg(long, default_value = "-", help = "JSON file path, '-' for stdin")]
        file: String,
    },
}

pub async fn handle(cmd: JobPostCommands, api: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        JobPostCommands::List => {
            let posts = api.job_posts().list().await?;
            output_collection(
                &output_format,
                "job_posts",
                &posts,
                &[("ID", 6), ("TITLE", 30), ("TYPE", 10), ("DEPARTMENT", 16), ("LOCATION", 0)],
                |p| {
                    vec![
                        p.id.to_string(),
                        p.details.title.clone(),
                        employment_label(p.details.employment_type).to_string(),
                        p.details.department.clone(),
                        p.details.location.clone(),
                    ]
                },
            )
        }
        JobPostCommands::Create { file } => {
            let post: NewJobPost = read_json_input(&file)?;
            let created = api.job_posts().create(&post).await?;
            output_success(
                &output_format,
                &format!("Job post '{}' created with id {}", created.details.title, created.id),
                Some(json!({ "job_post": created })),
            )
        }
        JobPostCommands::Update { id, file } => {
            let post: NewJobPost = read_json_input(&file)?;
            let updated = api.job_posts().update(id, &post).await?;
            output_success(
                &output_format,
                &format!("Job post {} updated", updated.id),
                Some(json!({ "job_post": updated })),
            )
        }
    }
}

fn employment_label(kind: EmploymentType) -> &'static str {
    match kind {
        EmploymentType::FullTime => "full time",
        EmploymentType::PartTime => "part time",
        EmploymentType::Contract => "contract",
    }
}
