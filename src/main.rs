use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docver::cli;

#[derive(Parser)]
#[command(name = "docver", version)]
#[command(about = "Publish Makefile versions as documentation attributes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the version attributes extracted from the Makefile
    Attributes {
        /// Output format: text, json, flags
        #[arg(long, default_value = "text")]
        format: String,

        /// Path to config file (defaults to ./docver.toml or ~/.config/docver/config.toml)
        #[arg(long)]
        config: Option<String>,

        /// Makefile to read (overrides config)
        #[arg(long)]
        makefile: Option<String>,
    },
    /// Build a playbook with the version attributes merged in
    Playbook {
        /// Playbook path
        #[arg(default_value = "antora-playbook.yml")]
        playbook: String,

        /// Write the resolved playbook here instead of stdout
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Path to config file (defaults to ./docver.toml or ~/.config/docver/config.toml)
        #[arg(long)]
        config: Option<String>,

        /// Makefile to read (overrides config)
        #[arg(long)]
        makefile: Option<String>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report or playbook
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Attributes {
            format,
            config,
            makefile,
        } => cli::attributes::run(config, makefile, &format)?,
        Commands::Playbook {
            playbook,
            output,
            config,
            makefile,
        } => cli::playbook::run(playbook, output, config, makefile)?,
    }

    Ok(())
}
