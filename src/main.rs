// ABOUTME: Entry point for the stratos CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use std::env;
use stratos::cloud::AwsCloud;
use stratos::commands;
use stratos::config::{self, Config};
use stratos::deploy::DeployMode;
use stratos::diagnostics::Diagnostics;
use stratos::error::{Error, Result};
use stratos::output::{Output, OutputMode};
use stratos::types::DeploymentId;
use stratos::verifier::ProcessVerifier;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(output_mode);

    match cli.command {
        Commands::Init {
            stack_prefix,
            force,
        } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, stack_prefix.as_deref(), force)
        }
        Commands::Deploy { update } => {
            let cwd = env::current_dir()?;
            let config = Config::discover(&cwd)?;

            let mode = if update {
                DeployMode::Update
            } else {
                DeployMode::Create
            };

            // One identity per run, shared by every region.
            let identity = DeploymentId::generate();
            let cloud = AwsCloud::new();
            let verifier = config
                .verifier
                .as_ref()
                .map(|v| ProcessVerifier::new(v.command.clone()));
            let mut diag = Diagnostics::default();

            output.start_timer();
            let summary = commands::deploy(
                &config,
                mode,
                &identity,
                &cloud,
                verifier.as_ref(),
                &output,
                &mut diag,
            )
            .await?;

            // Emit collected warnings
            for warning in diag.warnings() {
                output.warning(&warning.message);
            }

            output.success(&format!(
                "Success! Site is live at: {}",
                summary.entry_url
            ));
            Ok(())
        }
        Commands::Verify { url } => {
            let cwd = env::current_dir()?;
            let config = Config::discover(&cwd)?;
            let verifier_config = config.verifier.ok_or(Error::NoVerifier)?;
            let verifier = ProcessVerifier::new(verifier_config.command);

            commands::verify(&url, &verifier, &output).await
        }
    }
}
