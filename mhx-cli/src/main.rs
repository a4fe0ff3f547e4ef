mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::process;

use clap::Parser;
#[cfg(feature = "colored-output")]
use colored::*;
use tracing::{Level, error};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::{
    cli::{Args, Commands, OutputFormat},
    commands::{CommandExecutor, config_command},
    config::AppConfig,
    error::Result,
};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args).await {
        let config = AppConfig::load(args.config.as_deref()).ok();
        match args.output_format(config.as_ref()) {
            Some(OutputFormat::Json)
            | Some(OutputFormat::JsonCompact)
            | Some(OutputFormat::InfoDict) => {
                let error_json = serde_json::json!({
                    "status": "error",
                    "message": e.to_string(),
                });
                println!("{error_json}");
            }
            _ => {
                error!("Application error: {}", e);
                #[cfg(feature = "colored-output")]
                {
                    eprintln!("{} {}", "Error:".red().bold(), e);
                }
                #[cfg(not(feature = "colored-output"))]
                {
                    eprintln!("Error: {}", e);
                }
            }
        }
        process::exit(1);
    }
}

async fn run(args: &Args) -> Result<()> {
    init_logging(args.verbose, args.quiet);

    // Handled before loading, so `--reset` can repair a file that no longer parses.
    match &args.command {
        Commands::Config { show, reset } => {
            println!("{}", config_command(args.config.as_deref(), *show, *reset)?);
            return Ok(());
        }
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Args::command();
            let bin_name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let config = AppConfig::load(args.config.as_deref())?
        .with_overrides(args.timeout, args.user_agent.clone());

    let executor = CommandExecutor::new(config);

    match &args.command {
        Commands::Extract {
            url,
            output,
            output_file,
        } => {
            executor
                .extract_single(url, *output, output_file.as_deref())
                .await?;
        }

        Commands::Check { url, probe } => {
            executor.check(url, *probe).await?;
        }

        Commands::Config { .. } | Commands::Completions { .. } => {}
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(verbose),
        )
        .init();
}
