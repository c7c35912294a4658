//! band2influx CLI - Main entry point

use band2influx_cli::{
    commands,
    config::{CollectorConfig, ImportConfig},
    Cli, Commands,
};
use band2influx_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use clap::Parser;
use colored::Colorize;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries progress lines
    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .console_stderr(true)
        .log_file_prefix("band2influx")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().with_env().unwrap_or(log_config);

    // The CLI works without logging
    let _guard = init_logging(&log_config).ok().flatten();

    println!("{}", cli.command.banner().bold());
    println!();

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> band2influx_cli::Result<()> {
    match &cli.command {
        Commands::Push {
            source,
            host,
            user,
            pass,
        } => {
            let collector = CollectorConfig {
                url: host.clone(),
                username: user.clone(),
                password: pass.clone(),
                timeout_secs: cli.timeout_secs,
            };
            commands::push::run(source, &collector).await
        },

        Commands::Import {
            source,
            influx_endpoint,
            db,
            influx_user,
            influx_pass,
        } => {
            let target = ImportConfig {
                endpoint: influx_endpoint.clone(),
                database: db.clone(),
                username: influx_user.clone(),
                password: influx_pass.clone(),
                timeout_secs: cli.timeout_secs,
            };
            commands::import::run(source, &target).await
        },
    }
}
