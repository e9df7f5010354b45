// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stratos")]
#[command(about = "Provision, publish, and verify a static site stack on AWS")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output for CI
    #[arg(long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// JSON line output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new stratos.yml configuration file
    Init {
        /// Stack name prefix to write into the config
        #[arg(long)]
        stack_prefix: Option<String>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Provision the stack in every configured region and upload the site
    Deploy {
        /// Update the existing stack instead of creating a new one
        #[arg(long)]
        update: bool,
    },

    /// Run the configured verifier against a URL
    Verify {
        /// Entry URL to verify
        url: String,
    },
}
