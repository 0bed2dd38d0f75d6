use clap::Parser;
use hirehub_console::cli::Cli;
use hirehub_console::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so HIREHUB_BACKEND_HOST and friends apply
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env();
    let log_sink = hirehub_console::logging::init(&config.logging)?;
    tracing::debug!("Starting HireHub CLI in {:?} mode", config.environment);

    let cli = Cli::parse();
    let result = hirehub_console::cli::run(cli, config).await;

    // Deliver queued remote log events before the process goes away
    if let Some(sink) = &log_sink {
        sink.flush().await;
    }

    if let Err(e) = result {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
