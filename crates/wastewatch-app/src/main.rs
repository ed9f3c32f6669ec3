use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use wastewatch_infrastructure::logging::{get_log_dir, init_logger};
use wastewatch_lib::application::config::GamificationConfig;
use wastewatch_lib::presentation::bootstrap::{
    build_app_state, default_database_path, open_database,
};
use wastewatch_lib::presentation::cli::Cli;
use wastewatch_lib::presentation::commands::execute;

fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("wastewatch"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logs")
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logger(cli.log_dir.clone().unwrap_or_else(default_log_dir))?;
    if let Some(dir) = get_log_dir() {
        info!("Logging to {}", dir.display());
    }

    let config = GamificationConfig::from_env()?;
    let db_path = cli.database.clone().unwrap_or_else(default_database_path);
    let db = open_database(&db_path).await?;
    let state = build_app_state(db, config).await?;

    let output = execute(cli.command, &state).await;
    println!("{}", output.body);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        error!("Command failed");
        Ok(ExitCode::FAILURE)
    }
}
